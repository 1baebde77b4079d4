//! Error type definitions.
//!
//! This module defines the error enums returned by the library and the
//! error/info categories counted during a filtering run.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The DNS-over-HTTPS endpoint is not a usable URL.
    #[error("Invalid DNS-over-HTTPS endpoint '{endpoint}': {reason}")]
    DohEndpointError { endpoint: String, reason: String },
}

/// Fatal errors that stop a filtering run before or while it starts.
#[derive(Error, Debug)]
pub enum FilterError {
    /// The input could not be parsed as delimited text with a header row.
    #[error("Could not parse the uploaded file: {0}")]
    Parse(#[from] csv::Error),

    /// The input has no header, or a header and zero data rows.
    #[error("The uploaded file is empty: it needs a header row and at least one data row")]
    EmptyFile,

    /// No header key matches the accepted synonyms.
    #[error("No website/domain column found. Accepted column names: {}", .accepted.join(", "))]
    NoDomainColumnFound { accepted: Vec<String> },

    /// An explicitly requested column is not part of the header.
    #[error("Column '{0}' is not present in the header")]
    UnknownColumn(String),
}

/// Why a single MX lookup failed.
#[derive(Error, Debug)]
pub enum ResolutionFailure {
    /// Transport, timeout, HTTP status or body decoding failure.
    #[error("request failed: {0}")]
    Http(#[from] ReqwestError),

    /// The resolver answered with a non-zero DNS response code.
    #[error("DNS response code {0}")]
    Rcode(u32),

    /// The response did not follow the DNS JSON schema.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// A failed MX lookup for one domain.
///
/// The pipeline never aborts on this error: the affected row is kept.
#[derive(Error, Debug)]
#[error("MX lookup for {domain} failed: {cause}")]
pub struct ResolutionError {
    /// The canonical host that was looked up.
    pub domain: String,
    /// Underlying failure.
    #[source]
    pub cause: ResolutionFailure,
}

impl ResolutionError {
    pub fn new(domain: impl Into<String>, cause: ResolutionFailure) -> Self {
        Self {
            domain: domain.into(),
            cause,
        }
    }
}

/// Categories of failed MX lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    DnsTimeoutError,
    DnsConnectError,
    DnsRequestError,
    DnsDecodeError,
    DnsTooManyRequests,
    DnsHttpStatusError,
    DnsOtherError,
    DnsNxDomain,
    DnsServFail,
    DnsOtherRcode,
    DnsMalformedResponse,
}

/// Row decisions and other notable events during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    RowKept,
    RowExcluded,
    RowSkippedNoDomain,
    RowKeptAfterLookupFailure,
    LookupCancelled,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::DnsTimeoutError => "DoH request timeout",
            ErrorType::DnsConnectError => "DoH connect error",
            ErrorType::DnsRequestError => "DoH request error",
            ErrorType::DnsDecodeError => "DoH response decode error",
            ErrorType::DnsTooManyRequests => "DoH rate limited (429)",
            ErrorType::DnsHttpStatusError => "DoH HTTP status error",
            ErrorType::DnsOtherError => "DoH other error",
            ErrorType::DnsNxDomain => "Non-existent domain (NXDOMAIN)",
            ErrorType::DnsServFail => "DNS server failure (SERVFAIL)",
            ErrorType::DnsOtherRcode => "DNS error response code",
            ErrorType::DnsMalformedResponse => "Malformed DNS JSON response",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::RowKept => "Rows kept",
            InfoType::RowExcluded => "Rows excluded (provider match)",
            InfoType::RowSkippedNoDomain => "Rows skipped (no usable domain)",
            InfoType::RowKeptAfterLookupFailure => "Rows kept after failed lookup",
            InfoType::LookupCancelled => "Lookups cancelled",
        }
    }
}
