//! # Vellum Core - Foundation Crate
//!
//! **Purpose**: Define the permission domain types and the unified error type.
//!
//! This crate holds the data model shared by every other Vellum crate:
//! permission descriptors, rules, actors, resource locators, and the
//! `VellumError` / `Result` pair. It is pure — no async, no I/O, no
//! storage. The engine logic that consumes these types lives in
//! `vellum-authorization`.
//!
//! ## Core Concepts
//!
//! - **Descriptor**: the stored permission specification for one resource,
//!   holding explicit rules and/or a delegation link to an ancestor.
//! - **Rule**: one `(operator, state, subject)` triple; subjects are a
//!   tagged union of a named user or a role (`authenticated`/`public`).
//! - **Locator**: where a descriptor lives — the root node, a collection,
//!   a document, or an external deployment reached by URL.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Permission descriptors, rules, operators, and actors
pub mod descriptor;

/// Unified error type for all Vellum operations
pub mod errors;

/// Resource locator parsing
pub mod locator;

pub use descriptor::{
    Actor, Operator, PermissionDescriptor, Role, Rule, RuleState, RuleSubject, PUBLIC_ACTOR_ID,
};
pub use errors::{Result, VellumError};
pub use locator::ResourceLocator;
