//! MX resolver initialization.

use std::sync::Arc;

use crate::config::Config;
use crate::dns::DohResolver;
use crate::error_handling::InitializationError;

/// Builds the DNS-over-HTTPS resolver for `config.doh_endpoint`.
///
/// Lookups that fail transiently are retried `config.dns_retries` times.
///
/// # Errors
///
/// Returns `InitializationError::DohEndpointError` if the endpoint is not an
/// http(s) URL.
pub fn init_resolver(
    client: Arc<reqwest::Client>,
    config: &Config,
) -> Result<Arc<DohResolver>, InitializationError> {
    let resolver = DohResolver::new(client, &config.doh_endpoint, config.dns_retries)?;
    log::debug!(
        "Resolving MX records via {} ({} retries)",
        resolver.endpoint(),
        config.dns_retries
    );
    Ok(Arc::new(resolver))
}
