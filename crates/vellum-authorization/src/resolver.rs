//! Bounded inheritance-chain walking
//!
//! A descriptor without a `rules` field is pure delegation: its inherit
//! link names the ancestor whose descriptor should be consulted. The
//! resolver follows those links one at a time — each hop's target is
//! only known after the previous fetch lands, so the walk is strictly
//! sequential. The walk stops the instant a descriptor carries a
//! `rules` field, even an empty one or one with nothing matching the
//! requested operator: inheritance is non-cascading, and unmatched
//! operators do not fall through to the ancestor.

use crate::effects::{DescriptorStore, RemoteDescriptorFetcher};
use crate::validation;
use std::sync::Arc;
use tracing::{debug, warn};
use vellum_core::{PermissionDescriptor, ResourceLocator, Result, Rule, VellumError};

/// Hop bound for the inheritance walk.
///
/// Stored descriptors can form a cycle; without a bound the walk would
/// never terminate. Exceeding the bound is a `VellumError::Policy`.
pub const MAX_INHERITANCE_HOPS: usize = 32;

/// Walks inherit links to a terminal rule set.
pub struct InheritanceResolver {
    store: Arc<dyn DescriptorStore>,
    remote: Arc<dyn RemoteDescriptorFetcher>,
    root_descriptor: PermissionDescriptor,
    max_hops: usize,
}

impl InheritanceResolver {
    /// Build a resolver over the given store and remote fetcher.
    ///
    /// `root_descriptor` is the process-wide global default consulted
    /// when a link points at the root node. It is injected here as
    /// read-only configuration rather than read from ambient state.
    pub fn new(
        store: Arc<dyn DescriptorStore>,
        remote: Arc<dyn RemoteDescriptorFetcher>,
        root_descriptor: PermissionDescriptor,
    ) -> Self {
        Self {
            store,
            remote,
            root_descriptor,
            max_hops: MAX_INHERITANCE_HOPS,
        }
    }

    /// Override the hop bound.
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Follow delegation links until a descriptor carrying `rules` is
    /// found, and return that terminal rule set.
    ///
    /// A descriptor that already carries `rules` resolves with zero
    /// fetches. Every fetched descriptor is revalidated before the walk
    /// continues; any fetch failure, invalid descriptor, or a chain
    /// longer than the hop bound aborts the whole resolution.
    pub async fn resolve(&self, descriptor: &PermissionDescriptor) -> Result<Vec<Rule>> {
        let mut current = descriptor.clone();
        let mut hop = 0usize;

        loop {
            if let Some(rules) = current.rules {
                return Ok(rules);
            }

            let Some(link) = current.inherit_link else {
                // Validated descriptors always have one field or the
                // other; reaching this means the caller skipped
                // validation.
                return Err(VellumError::invalid(
                    "descriptor carries neither rules nor an inherit link",
                ));
            };

            if hop >= self.max_hops {
                warn!(max_hops = self.max_hops, link = %link, "inheritance chain exceeded hop bound");
                return Err(VellumError::policy(format!(
                    "inheritance chain exceeded {} hops",
                    self.max_hops
                )));
            }

            let locator = ResourceLocator::parse(&link)?;
            debug!(hop, %locator, "following inherit link");

            let next = match &locator {
                ResourceLocator::Root => self.root_descriptor.clone(),
                ResourceLocator::Collection(_) | ResourceLocator::Document { .. } => {
                    let (descriptor, _creator) = self.store.fetch_descriptor(&locator).await?;
                    descriptor
                }
                ResourceLocator::External(url) => self.remote.fetch_descriptor(url).await?,
            };

            if !validation::validate(&next) {
                return Err(VellumError::invalid(format!(
                    "invalid descriptor fetched from {locator}"
                )));
            }

            current = next;
            hop += 1;
        }
    }
}
