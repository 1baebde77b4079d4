//! Error categorization and retry strategy.
//!
//! This module provides functions to categorize lookup failures and configure
//! the retry strategy used by the DNS-over-HTTPS resolver.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::{ErrorType, ResolutionFailure};
use crate::config::{
    DNS_RCODE_NXDOMAIN, DNS_RCODE_SERVFAIL, HTTP_STATUS_TOO_MANY_REQUESTS, RETRY_BACKOFF_BASE,
    RETRY_FACTOR, RETRY_MAX_DELAY_SECS,
};

/// Creates an exponential backoff retry strategy.
///
/// Delays are 200ms, 400ms, 800ms, ... capped at `RETRY_MAX_DELAY_SECS`, and
/// the iterator yields at most `max_retries` delays (so the operation runs at
/// most `max_retries + 1` times).
pub fn get_retry_strategy(max_retries: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(RETRY_BACKOFF_BASE)
        .factor(RETRY_FACTOR)
        .max_delay(Duration::from_secs(RETRY_MAX_DELAY_SECS))
        .take(max_retries)
}

/// Categorizes a `reqwest::Error` raised while talking to the DoH endpoint.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if let Some(status) = error.status() {
        if status.as_u16() == HTTP_STATUS_TOO_MANY_REQUESTS {
            return ErrorType::DnsTooManyRequests;
        }
        return ErrorType::DnsHttpStatusError;
    }

    if error.is_timeout() {
        ErrorType::DnsTimeoutError
    } else if error.is_connect() {
        ErrorType::DnsConnectError
    } else if error.is_decode() {
        ErrorType::DnsDecodeError
    } else if error.is_request() {
        ErrorType::DnsRequestError
    } else {
        ErrorType::DnsOtherError
    }
}

/// Maps a lookup failure to the counter it is reported under.
pub fn categorize_resolution_failure(failure: &ResolutionFailure) -> ErrorType {
    match failure {
        ResolutionFailure::Http(e) => categorize_reqwest_error(e),
        ResolutionFailure::Rcode(DNS_RCODE_NXDOMAIN) => ErrorType::DnsNxDomain,
        ResolutionFailure::Rcode(DNS_RCODE_SERVFAIL) => ErrorType::DnsServFail,
        ResolutionFailure::Rcode(_) => ErrorType::DnsOtherRcode,
        ResolutionFailure::Malformed(_) => ErrorType::DnsMalformedResponse,
    }
}

/// Determines if a lookup failure is transient and worth retrying.
///
/// Retriable: timeouts, connect/request errors, 5xx, 429 and SERVFAIL.
/// Everything else (NXDOMAIN, 4xx, undecodable bodies) fails immediately.
pub fn is_retriable_failure(failure: &ResolutionFailure) -> bool {
    match failure {
        ResolutionFailure::Http(e) => {
            if let Some(status) = e.status() {
                return status.as_u16() == HTTP_STATUS_TOO_MANY_REQUESTS
                    || status.is_server_error();
            }
            e.is_timeout() || e.is_connect() || e.is_request()
        }
        ResolutionFailure::Rcode(code) => *code == DNS_RCODE_SERVFAIL,
        ResolutionFailure::Malformed(_) => false,
    }
}
