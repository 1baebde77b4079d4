//! Configuration constants.
//!
//! This module defines the defaults used throughout the application: column
//! synonyms, DNS-over-HTTPS settings, concurrency, retry and logging intervals.

// constants (used as defaults)
/// Maximum concurrent MX lookups.
/// Kept small so a single upload does not hammer the public DoH endpoint.
pub const DEFAULT_MAX_CONCURRENCY: usize = 5;
/// Seconds between progress log lines.
pub const LOGGING_INTERVAL: u64 = 5;
/// Seconds between progress log lines when the status server is running.
pub const STATUS_SERVER_LOGGING_INTERVAL_SECS: u64 = 30;

// DNS-over-HTTPS
/// Default DNS-over-HTTPS JSON endpoint.
/// Any provider speaking the `application/dns-json` format works (Google, Cloudflare).
pub const DEFAULT_DOH_ENDPOINT: &str = "https://dns.google/resolve";
/// Accept header value for the DoH JSON format.
pub const DOH_JSON_CONTENT_TYPE: &str = "application/dns-json";
/// Per-request DNS-over-HTTPS timeout in seconds.
pub const DNS_TIMEOUT_SECS: u64 = 10;
/// DNS record type code for MX.
pub const MX_RECORD_TYPE: u16 = 15;
/// DNS rcode for a successful answer.
pub const DNS_RCODE_NOERROR: u32 = 0;
/// DNS rcode for a server failure (retriable).
pub const DNS_RCODE_SERVFAIL: u32 = 2;
/// DNS rcode for a non-existent domain.
pub const DNS_RCODE_NXDOMAIN: u32 = 3;
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Default User-Agent for DoH requests.
pub const DEFAULT_USER_AGENT: &str = concat!("mx_filter/", env!("CARGO_PKG_VERSION"));

// Filtering
/// Substring that marks the excluded provider's mail exchangers
/// (`*.mail.protection.outlook.com`).
pub const DEFAULT_EXCLUDED_MX_PATTERN: &str = ".outlook";
/// Fixed name of the filtered output file.
pub const DEFAULT_OUTPUT_FILE: &str = "filtered.csv";
/// Default field delimiter for input and output.
pub const DEFAULT_DELIMITER: char = ',';

/// Header names accepted as the website/domain column.
///
/// Compared case-insensitively against trimmed header keys. The CLI can add
/// more with `--column-synonym`.
pub const DOMAIN_COLUMN_SYNONYMS: &[&str] = &[
    "domain",
    "domains",
    "website",
    "websites",
    "url",
    "web",
    "site",
    "homepage",
    "home page",
    "web address",
    "website url",
    "domain name",
    "root_domain",
    "root domain",
    "company website",
    "company domain",
    "company url",
    "company_website",
    "company_domain",
    "business domain",
    "business website",
    "organization domain",
    "account website",
    "account domain",
];

// Retry strategy
/// Base of the exponential backoff (delays are `base^n * factor` ms).
pub const RETRY_BACKOFF_BASE: u64 = 2;
/// Multiplier applied to each backoff step (first retry waits 200ms).
pub const RETRY_FACTOR: u64 = 100;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 5;
/// Default number of retries for a failed MX lookup.
pub const DEFAULT_DNS_RETRIES: usize = 1;
