//! Registry fetch over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::error::RegistryError;
use crate::domain::registry::Registry;
use crate::ports::outbound::RegistryProvider;

/// Fetches the services registry with one GET per pass.
///
/// Transport only: the payload shape lives in [`Registry::from_json`], so
/// decoding problems and transport problems stay distinguishable.
pub struct HttpRegistry {
    client: reqwest::Client,
    url: String,
}

impl HttpRegistry {
    /// `timeout` bounds the whole fetch, connect through body.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl RegistryProvider for HttpRegistry {
    async fn fetch(&self) -> Result<Registry, RegistryError> {
        debug!(url = %self.url, "fetching services registry");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| RegistryError::Http {
                reason: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|err| RegistryError::Http {
            reason: err.to_string(),
        })?;
        let registry = Registry::from_json(&body)?;
        debug!(services = registry.len(), "registry loaded");
        Ok(registry)
    }
}
