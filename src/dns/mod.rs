//! MX resolution.
//!
//! This module provides the [`MxResolver`] seam used by the filter pipeline
//! and its DNS-over-HTTPS implementation:
//! - `doh`: `reqwest`-based JSON API client with bounded retries
//! - `records`: response schema and MX record parsing

mod doh;
mod records;

use async_trait::async_trait;

use crate::error_handling::ResolutionError;

// Re-export public API
pub use doh::DohResolver;
pub use records::{DohAnswer, DohResponse, MxRecord};

/// Looks up the MX records of a domain.
///
/// Implementations return the raw record data strings (typically
/// `"<preference> <exchange-host>."`) and fail with a [`ResolutionError`]
/// carrying the domain on transport errors, timeouts, non-resolving domains
/// or malformed answers.
#[async_trait]
pub trait MxResolver: Send + Sync {
    async fn resolve_mx(&self, domain: &str) -> Result<Vec<String>, ResolutionError>;
}
