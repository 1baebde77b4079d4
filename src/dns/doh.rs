//! MX lookups over DNS-over-HTTPS (JSON API).

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tokio_retry::RetryIf;
use url::Url;

use super::records::DohResponse;
use super::MxResolver;
use crate::config::{DNS_RCODE_NOERROR, DOH_JSON_CONTENT_TYPE};
use crate::error_handling::{
    get_retry_strategy, is_retriable_failure, InitializationError, ResolutionError,
    ResolutionFailure,
};

/// Resolves MX records through a DNS-over-HTTPS JSON endpoint.
///
/// Sends `GET <endpoint>?name=<domain>&type=MX` with
/// `Accept: application/dns-json`. Transient failures are retried with
/// exponential backoff up to `max_retries` times.
#[derive(Debug, Clone)]
pub struct DohResolver {
    client: Arc<reqwest::Client>,
    endpoint: Url,
    max_retries: usize,
}

impl DohResolver {
    /// Creates a resolver for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::DohEndpointError` if the endpoint is not
    /// an http(s) URL.
    pub fn new(
        client: Arc<reqwest::Client>,
        endpoint: &str,
        max_retries: usize,
    ) -> Result<Self, InitializationError> {
        let endpoint = Url::parse(endpoint).map_err(|e| InitializationError::DohEndpointError {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(InitializationError::DohEndpointError {
                endpoint: endpoint.to_string(),
                reason: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }
        Ok(Self {
            client,
            endpoint,
            max_retries,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn query_once(&self, domain: &str) -> Result<Vec<String>, ResolutionFailure> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("name", domain), ("type", "MX")])
            .header(ACCEPT, DOH_JSON_CONTENT_TYPE)
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        let parsed: DohResponse = serde_json::from_slice(&body)
            .map_err(|e| ResolutionFailure::Malformed(e.to_string()))?;

        if parsed.status != DNS_RCODE_NOERROR {
            return Err(ResolutionFailure::Rcode(parsed.status));
        }
        Ok(parsed.mx_data())
    }
}

#[async_trait]
impl MxResolver for DohResolver {
    async fn resolve_mx(&self, domain: &str) -> Result<Vec<String>, ResolutionError> {
        let strategy = get_retry_strategy(self.max_retries);
        let records = RetryIf::spawn(
            strategy,
            || self.query_once(domain),
            |failure: &ResolutionFailure| {
                let retry = is_retriable_failure(failure);
                if retry {
                    log::debug!("Retrying MX lookup for {domain} after: {failure}");
                }
                retry
            },
        )
        .await
        .map_err(|cause| ResolutionError::new(domain, cause))?;

        log::debug!("MX records for {domain}: {records:?}");
        Ok(records)
    }
}
