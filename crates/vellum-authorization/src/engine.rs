//! Authorization façade exposed to the CRUD layer
//!
//! The CRUD layer calls [`AuthorizationEngine`] before every read,
//! write, create, delete, or govern action. The engine resolves the
//! resource's descriptor to a terminal rule set and evaluates it; it
//! owns no mutable state, so concurrent checks need no locking.

use crate::effects::{DescriptorStore, RemoteDescriptorFetcher};
use crate::evaluation;
use crate::resolver::InheritanceResolver;
use crate::validation;
use std::sync::Arc;
use tracing::debug;
use vellum_core::{
    Actor, Operator, PermissionDescriptor, ResourceLocator, Result, VellumError,
};

/// Orchestrates validation, inheritance resolution, and evaluation.
pub struct AuthorizationEngine {
    store: Arc<dyn DescriptorStore>,
    resolver: InheritanceResolver,
    root_descriptor: PermissionDescriptor,
}

impl AuthorizationEngine {
    /// Build an engine over the given store and remote fetcher.
    ///
    /// `root_descriptor` is the global default descriptor: the terminal
    /// ancestor of every local inheritance chain and the descriptor
    /// reported for the root node. It is read-only configuration; see
    /// [`Self::update_permissions`].
    pub fn new(
        store: Arc<dyn DescriptorStore>,
        remote: Arc<dyn RemoteDescriptorFetcher>,
        root_descriptor: PermissionDescriptor,
    ) -> Self {
        let resolver =
            InheritanceResolver::new(store.clone(), remote, root_descriptor.clone());
        Self {
            store,
            resolver,
            root_descriptor,
        }
    }

    /// Decide whether `actor` holds `operator` on a resource whose
    /// stored descriptor and creator are given.
    ///
    /// Resolves the descriptor to its terminal rule set (possibly
    /// walking local and remote ancestors) and evaluates it. Errors
    /// abort the check and must be treated as denial by callers gating
    /// an operation.
    pub async fn has_permission(
        &self,
        operator: Operator,
        descriptor: &PermissionDescriptor,
        creator: &str,
        actor: &Actor,
    ) -> Result<bool> {
        let rules = self.resolver.resolve(descriptor).await?;
        let allowed = evaluation::evaluate(operator, &rules, creator, actor);
        debug!(%operator, actor = %actor.id, allowed, "permission check");
        Ok(allowed)
    }

    /// Fetch the descriptor stored at exactly this node, for display or
    /// editing — not the resolved terminal rules.
    ///
    /// With `Some(actor)`, the actor must hold `govern` on the node.
    /// `None` marks a trusted internal call that bypasses the
    /// governance check; it exists for the engine's own plumbing and
    /// must never be reachable from untrusted external input — it is
    /// not an anonymous-caller path (that is `Actor::public()`).
    pub async fn get_permissions(
        &self,
        locator: &ResourceLocator,
        actor: Option<&Actor>,
    ) -> Result<PermissionDescriptor> {
        let (descriptor, creator) = self.node_descriptor(locator).await?;

        if let Some(actor) = actor {
            if !self
                .has_permission(Operator::Govern, &descriptor, &creator, actor)
                .await?
            {
                return Err(VellumError::permission_denied(format!(
                    "{} may not govern {locator}",
                    actor.id
                )));
            }
        }

        Ok(descriptor)
    }

    /// Replace the descriptor stored at a node.
    ///
    /// The new descriptor is validated first; the actor must hold
    /// `govern` under the node's *current* descriptor. On success only
    /// this node's descriptor changes — ancestors are untouched, and
    /// the store performs the replace atomically for the node. The root
    /// node's descriptor is injected configuration and cannot be
    /// updated here; neither can a node owned by another deployment.
    pub async fn update_permissions(
        &self,
        locator: &ResourceLocator,
        descriptor: PermissionDescriptor,
        actor: &Actor,
    ) -> Result<()> {
        if !validation::validate(&descriptor) {
            return Err(VellumError::invalid(
                "descriptor must carry an inherit link or rules covering govern/read/write/add",
            ));
        }

        if !matches!(
            locator,
            ResourceLocator::Collection(_) | ResourceLocator::Document { .. }
        ) {
            return Err(VellumError::invalid(format!(
                "permissions at {locator} are not locally governed"
            )));
        }

        let (current, creator) = self.store.fetch_descriptor(locator).await?;
        if !self
            .has_permission(Operator::Govern, &current, &creator, actor)
            .await?
        {
            return Err(VellumError::permission_denied(format!(
                "{} may not govern {locator}",
                actor.id
            )));
        }

        debug!(%locator, actor = %actor.id, "replacing node descriptor");
        self.store.store_descriptor(locator, descriptor).await
    }

    /// Descriptor and creator stored at a node.
    ///
    /// The root node reports the injected global default with no
    /// creator, so `self`-scoped rules there address nobody. An
    /// external node's descriptor belongs to the remote deployment and
    /// cannot be read as a local node.
    async fn node_descriptor(
        &self,
        locator: &ResourceLocator,
    ) -> Result<(PermissionDescriptor, String)> {
        match locator {
            ResourceLocator::Root => Ok((self.root_descriptor.clone(), String::new())),
            ResourceLocator::Collection(_) | ResourceLocator::Document { .. } => {
                self.store.fetch_descriptor(locator).await
            }
            ResourceLocator::External(url) => Err(VellumError::invalid(format!(
                "{url} is not a local resource"
            ))),
        }
    }
}
