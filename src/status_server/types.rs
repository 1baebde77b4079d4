//! Status server data structures.

use serde::Serialize;

use crate::error_handling::{ErrorType, ProcessingStats};
use crate::run::{RunSnapshot, RunStatus};

/// Shared state for the status server
#[derive(Clone)]
pub struct StatusState {
    pub status: RunStatus,
}

impl StatusState {
    pub fn new(status: RunStatus) -> Self {
        Self { status }
    }
}

/// JSON response for `/status` endpoint
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub run: RunSnapshot,
    pub percentage_complete: f64,
    pub rate_per_second: f64,
    pub errors: ErrorCounts,
}

/// Failed lookups grouped by cause.
#[derive(Debug, Default, Serialize)]
pub struct ErrorCounts {
    pub total: usize,
    pub timeout: usize,
    pub connection_error: usize,
    pub http_error: usize,
    pub nxdomain: usize,
    pub servfail: usize,
    pub malformed_response: usize,
    pub other_error: usize,
}

impl ErrorCounts {
    pub fn from_stats(stats: &ProcessingStats) -> Self {
        let count = |error_type| stats.get_error_count(error_type);
        Self {
            total: stats.total_errors(),
            timeout: count(ErrorType::DnsTimeoutError),
            connection_error: count(ErrorType::DnsConnectError),
            http_error: count(ErrorType::DnsHttpStatusError)
                + count(ErrorType::DnsTooManyRequests),
            nxdomain: count(ErrorType::DnsNxDomain),
            servfail: count(ErrorType::DnsServFail),
            malformed_response: count(ErrorType::DnsMalformedResponse)
                + count(ErrorType::DnsDecodeError),
            other_error: count(ErrorType::DnsRequestError)
                + count(ErrorType::DnsOtherRcode)
                + count(ErrorType::DnsOtherError),
        }
    }
}

/// Share of rows with a domain whose lookup has finished (0-100).
pub(super) fn percentage_complete(snapshot: &RunSnapshot) -> f64 {
    if snapshot.resolvable_rows > 0 {
        (snapshot.processed_rows as f64 / snapshot.resolvable_rows as f64) * 100.0
    } else {
        0.0
    }
}

pub(super) fn rate_per_second(snapshot: &RunSnapshot) -> f64 {
    if snapshot.elapsed_seconds > 0.0 {
        snapshot.processed_rows as f64 / snapshot.elapsed_seconds
    } else {
        0.0
    }
}
