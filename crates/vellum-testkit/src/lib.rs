//! In-memory test doubles for the Vellum engine
//!
//! [`MemoryDescriptorStore`] and [`ScriptedFetcher`] implement the
//! engine's effect seams over plain maps, counting their calls so tests
//! can assert how many fetches a resolution performed.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use vellum_authorization::{DescriptorStore, RemoteDescriptorFetcher};
use vellum_core::{
    Operator, PermissionDescriptor, ResourceLocator, Result, Role, Rule, RuleState, VellumError,
};

/// The conventional root descriptor used across tests: authenticated
/// actors read anything and write/add/govern what they created.
pub fn standard_root_descriptor() -> PermissionDescriptor {
    PermissionDescriptor::with_rules(vec![
        Rule::role(Operator::Read, RuleState::All, Role::Authenticated),
        Rule::role(Operator::Write, RuleState::SelfOnly, Role::Authenticated),
        Rule::role(Operator::Add, RuleState::SelfOnly, Role::Authenticated),
        Rule::role(Operator::Govern, RuleState::SelfOnly, Role::Authenticated),
    ])
}

/// In-memory [`DescriptorStore`] keyed by locator.
///
/// The whole map sits behind one `tokio::sync::RwLock`, which gives the
/// single-node replace atomicity the store contract requires.
#[derive(Default)]
pub struct MemoryDescriptorStore {
    nodes: RwLock<HashMap<ResourceLocator, (PermissionDescriptor, String)>>,
    fetches: AtomicUsize,
}

impl MemoryDescriptorStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite a node with its descriptor and creator id.
    pub async fn insert(
        &self,
        locator: ResourceLocator,
        descriptor: PermissionDescriptor,
        creator: impl Into<String>,
    ) {
        self.nodes
            .write()
            .await
            .insert(locator, (descriptor, creator.into()));
    }

    /// Descriptor currently stored at a node, if any.
    pub async fn stored_descriptor(
        &self,
        locator: &ResourceLocator,
    ) -> Option<PermissionDescriptor> {
        self.nodes
            .read()
            .await
            .get(locator)
            .map(|(descriptor, _)| descriptor.clone())
    }

    /// Number of `fetch_descriptor` calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DescriptorStore for MemoryDescriptorStore {
    async fn fetch_descriptor(
        &self,
        locator: &ResourceLocator,
    ) -> Result<(PermissionDescriptor, String)> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.nodes
            .read()
            .await
            .get(locator)
            .cloned()
            .ok_or_else(|| VellumError::not_found(format!("no resource at {locator}")))
    }

    async fn store_descriptor(
        &self,
        locator: &ResourceLocator,
        descriptor: PermissionDescriptor,
    ) -> Result<()> {
        let mut nodes = self.nodes.write().await;
        match nodes.get_mut(locator) {
            Some((stored, _creator)) => {
                *stored = descriptor;
                Ok(())
            }
            None => Err(VellumError::not_found(format!("no resource at {locator}"))),
        }
    }
}

/// Scripted [`RemoteDescriptorFetcher`]: URLs map to canned descriptor
/// bodies; anything unscripted fails with a network error, standing in
/// for an unreachable deployment.
#[derive(Default)]
pub struct ScriptedFetcher {
    bodies: HashMap<String, PermissionDescriptor>,
    fetches: AtomicUsize,
}

impl ScriptedFetcher {
    /// Fetcher with no scripted URLs; every fetch fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a URL to return the given descriptor body.
    pub fn with_descriptor(
        mut self,
        url: impl Into<String>,
        descriptor: PermissionDescriptor,
    ) -> Self {
        self.bodies.insert(url.into(), descriptor);
        self
    }

    /// Number of fetches attempted so far, successful or not.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteDescriptorFetcher for ScriptedFetcher {
    async fn fetch_descriptor(&self, url: &str) -> Result<PermissionDescriptor> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| VellumError::network(format!("GET {url}: connection refused")))
    }
}
