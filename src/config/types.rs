//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_DELIMITER, DEFAULT_DNS_RETRIES, DEFAULT_DOH_ENDPOINT, DEFAULT_EXCLUDED_MX_PATTERN,
    DEFAULT_MAX_CONCURRENCY, DEFAULT_OUTPUT_FILE, DEFAULT_USER_AGENT, DNS_TIMEOUT_SECS,
    DOMAIN_COLUMN_SYNONYMS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How an MX record is compared against the excluded-provider pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum MatchMode {
    /// Case-insensitive substring of the raw record (`"10 host.example."`).
    #[default]
    Substring,
    /// Exchange host equals the pattern or is a subdomain of it.
    HostSuffix,
}

/// Command-line options and library configuration.
///
/// All options have defaults and can be overridden via command-line flags.
///
/// # Examples
///
/// ```bash
/// # Basic usage, writes ./filtered.csv
/// mx_filter contacts.csv
///
/// # Stricter provider match and more parallel lookups
/// mx_filter contacts.csv --match-mode host-suffix --exclude-pattern outlook.com --max-concurrency 10
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mx_filter",
    version,
    about = "Removes CSV rows whose domain receives mail through an excluded provider."
)]
pub struct Config {
    /// CSV file to filter (must have a header row)
    #[arg(value_parser)]
    pub file: PathBuf,

    /// Where to write the kept rows
    #[arg(long, short, value_parser, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Maximum concurrent MX lookups
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Per-lookup timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// DNS-over-HTTPS JSON endpoint
    #[arg(long, default_value = DEFAULT_DOH_ENDPOINT, value_parser = parse_endpoint)]
    pub doh_endpoint: String,

    /// Pattern identifying the excluded provider's mail exchangers
    #[arg(long, default_value = DEFAULT_EXCLUDED_MX_PATTERN)]
    pub exclude_pattern: String,

    /// How the pattern is matched: substring|host-suffix
    #[arg(long, value_enum, default_value_t = MatchMode::Substring)]
    pub match_mode: MatchMode,

    /// Use this column instead of detecting one from the header
    #[arg(long)]
    pub domain_column: Option<String>,

    /// Extra header name accepted as the domain column (repeatable)
    #[arg(long = "column-synonym")]
    pub column_synonyms: Vec<String>,

    /// Field delimiter for input and output
    #[arg(long, default_value_t = DEFAULT_DELIMITER, value_parser = parse_delimiter)]
    pub delimiter: char,

    /// Retries for a failed lookup (0 disables)
    #[arg(long, default_value_t = DEFAULT_DNS_RETRIES)]
    pub dns_retries: usize,

    /// HTTP User-Agent header value for DoH requests
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// HTTP status server port (disabled by default)
    #[arg(long)]
    pub status_port: Option<u16>,
}

impl Config {
    /// Accepted domain-column names: the built-in list followed by any extras.
    pub fn domain_column_synonyms(&self) -> Vec<String> {
        let mut synonyms: Vec<String> = DOMAIN_COLUMN_SYNONYMS
            .iter()
            .map(|s| s.to_string())
            .collect();
        for extra in &self.column_synonyms {
            let extra = extra.trim().to_lowercase();
            if !extra.is_empty() && !synonyms.contains(&extra) {
                synonyms.push(extra);
            }
        }
        synonyms
    }

    /// The delimiter as the single byte the CSV reader and writer expect.
    pub fn delimiter_byte(&self) -> u8 {
        // parse_delimiter only admits ASCII
        self.delimiter as u8
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("contacts.csv"),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_seconds: DNS_TIMEOUT_SECS,
            doh_endpoint: DEFAULT_DOH_ENDPOINT.to_string(),
            exclude_pattern: DEFAULT_EXCLUDED_MX_PATTERN.to_string(),
            match_mode: MatchMode::Substring,
            domain_column: None,
            column_synonyms: Vec::new(),
            delimiter: DEFAULT_DELIMITER,
            dns_retries: DEFAULT_DNS_RETRIES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            status_port: None,
        }
    }
}

fn parse_endpoint(value: &str) -> Result<String, String> {
    let parsed = url::Url::parse(value).map_err(|e| format!("invalid URL '{value}': {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(value.to_string()),
        other => Err(format!("unsupported scheme '{other}', expected http or https")),
    }
}

fn parse_delimiter(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some('\\'), Some('t')) if value.len() == 2 => Ok('\t'),
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(format!("delimiter must be a single ASCII character, got '{value}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_concurrency, 5);
        assert_eq!(config.exclude_pattern, ".outlook");
        assert_eq!(config.match_mode, MatchMode::Substring);
        assert_eq!(config.output, PathBuf::from("filtered.csv"));
        assert_eq!(config.doh_endpoint, "https://dns.google/resolve");
        assert_eq!(config.delimiter_byte(), b',');
        assert!(config.status_port.is_none());
    }

    #[test]
    fn test_domain_column_synonyms_extend_defaults() {
        let config = Config {
            column_synonyms: vec!["  Firm Site ".to_string(), "DOMAIN".to_string()],
            ..Default::default()
        };
        let synonyms = config.domain_column_synonyms();
        assert_eq!(synonyms.len(), DOMAIN_COLUMN_SYNONYMS.len() + 1);
        assert_eq!(synonyms.last().map(String::as_str), Some("firm site"));
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";"), Ok(';'));
        assert_eq!(parse_delimiter("\\t"), Ok('\t'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("é").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn test_parse_endpoint() {
        assert!(parse_endpoint("https://cloudflare-dns.com/dns-query").is_ok());
        assert!(parse_endpoint("ftp://example.com").is_err());
        assert!(parse_endpoint("not a url").is_err());
    }
}
