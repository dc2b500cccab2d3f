//! Structural descriptor validation
//!
//! Rule well-formedness (operator/state enums, exactly-one-subject) is
//! enforced by the serde types in `vellum-core`, so any descriptor value
//! that exists has well-formed rules. What remains here are the semantic
//! invariants a parsed descriptor can still violate: it must carry at
//! least one of `inheritLink`/`rules`, and a descriptor that does not
//! delegate must cover all four operators.

use vellum_core::{Operator, PermissionDescriptor};

/// Check a descriptor against the structural invariants.
///
/// Returns `false` rather than erroring; callers surface a failure as
/// `VellumError::Invalid`. Run on every descriptor accepted from the
/// outside — governance updates and descriptors fetched during
/// inheritance resolution alike.
pub fn validate(descriptor: &PermissionDescriptor) -> bool {
    match (&descriptor.inherit_link, &descriptor.rules) {
        (None, None) => false,
        // A delegating descriptor may carry any rules or none; the link
        // covers whatever the rules do not.
        (Some(_), _) => true,
        (None, Some(rules)) => Operator::ALL
            .iter()
            .all(|operator| rules.iter().any(|rule| rule.operator == *operator)),
    }
}
