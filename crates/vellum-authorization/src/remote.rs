//! HTTP fetcher for descriptors on remote deployments

use crate::effects::RemoteDescriptorFetcher;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use vellum_core::{PermissionDescriptor, Result, VellumError};

/// Default request timeout for remote descriptor fetches.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Production [`RemoteDescriptorFetcher`]: one unauthenticated GET,
/// JSON body, hard timeout. Transport failures, non-success statuses,
/// and timeouts all surface as `VellumError::Network` — an
/// unauthorizable resource denies access rather than defaulting open.
pub struct HttpDescriptorFetcher {
    client: reqwest::Client,
}

impl HttpDescriptorFetcher {
    /// Fetcher with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    /// Fetcher with an explicit request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| VellumError::internal(format!("building HTTP client: {err}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RemoteDescriptorFetcher for HttpDescriptorFetcher {
    async fn fetch_descriptor(&self, url: &str) -> Result<PermissionDescriptor> {
        debug!(url, "fetching remote descriptor");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| VellumError::network(format!("GET {url}: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VellumError::network(format!("GET {url}: status {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| VellumError::network(format!("GET {url}: reading body: {err}")))?;

        // A body that is not a descriptor is a bad descriptor, not a
        // transport fault.
        let descriptor: PermissionDescriptor = serde_json::from_slice(&body)?;
        Ok(descriptor)
    }
}
