//! # Vellum Authorization - Permission Resolution Engine
//!
//! **Purpose**: Decide allow/deny for operations against the document
//! store, resolving hierarchical permission descriptors along the way.
//!
//! A resource's descriptor either carries explicit rules or delegates to
//! an ancestor through an inherit link. Links form a chain — possibly
//! crossing into other deployments — that the [`InheritanceResolver`]
//! walks, one awaited fetch per hop, until it reaches a descriptor with
//! a `rules` field. That terminal rule set is handed to the evaluator
//! for the any-match-wins verdict. The [`AuthorizationEngine`] façade
//! ties the pieces together and is the only surface the CRUD layer
//! calls.
//!
//! The engine owns no state beyond injected configuration; every check
//! is a pure function of its inputs plus the descriptor fetches
//! performed through the [`effects`] seams. Any error — bad descriptor,
//! missing ancestor, failed remote fetch, chain too deep — aborts the
//! whole check, and callers must treat it as a denial.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Store and network seams consumed by the engine
pub mod effects;

/// Rule evaluation: filter, then any-match-wins
pub mod evaluation;

/// Authorization façade exposed to the CRUD layer
pub mod engine;

/// HTTP fetcher for descriptors on remote deployments
pub mod remote;

/// Bounded inheritance-chain walking
pub mod resolver;

/// Structural descriptor validation
pub mod validation;

pub use effects::{DescriptorStore, RemoteDescriptorFetcher};
pub use engine::AuthorizationEngine;
pub use remote::HttpDescriptorFetcher;
pub use resolver::{InheritanceResolver, MAX_INHERITANCE_HOPS};
