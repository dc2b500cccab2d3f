//! Store and network seams consumed by the engine
//!
//! The document store and the HTTP stack are external collaborators;
//! the engine reaches them only through these traits. Trait definitions
//! live here, implementations in consumers — the CRUD layer supplies
//! the real store, [`crate::remote::HttpDescriptorFetcher`] supplies
//! the real network fetch, and `vellum-testkit` supplies in-memory
//! doubles for tests.

use async_trait::async_trait;
use vellum_core::{PermissionDescriptor, ResourceLocator, Result};

/// Access to descriptors stored alongside local resources.
#[async_trait]
pub trait DescriptorStore: Send + Sync {
    /// Fetch the descriptor and creator id stored at a node.
    ///
    /// Returns `VellumError::NotFound` when the resource does not
    /// exist. Only `Collection` and `Document` locators address stored
    /// nodes; the engine never passes `Root` or `External` here.
    async fn fetch_descriptor(
        &self,
        locator: &ResourceLocator,
    ) -> Result<(PermissionDescriptor, String)>;

    /// Replace the descriptor stored at a node, leaving its creator id
    /// untouched.
    ///
    /// Contract: the replace is atomic for that single node — a
    /// concurrent reader observes the old or the new descriptor in
    /// full, never a partial write. Multi-node transactions are not
    /// required. Returns `VellumError::NotFound` when the resource does
    /// not exist.
    async fn store_descriptor(
        &self,
        locator: &ResourceLocator,
        descriptor: PermissionDescriptor,
    ) -> Result<()>;
}

/// One unauthenticated GET of a descriptor from another deployment.
///
/// Fetched bodies carry no signature and are trusted as-is — an
/// accepted risk of the inherit-link design, inherited from the wire
/// format rather than introduced here. Implementations must enforce a
/// request timeout; a failure or timeout denies the check (fail
/// closed), surfaced as `VellumError::Network`.
#[async_trait]
pub trait RemoteDescriptorFetcher: Send + Sync {
    /// GET `url` and parse the JSON body as a descriptor.
    async fn fetch_descriptor(&self, url: &str) -> Result<PermissionDescriptor>;
}
