// Shared test helpers: a mock DNS-over-HTTPS endpoint and temporary files.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::io::Write;
use std::path::PathBuf;

use mx_filter::{Config, LogFormat, LogLevel};
use serde_json::json;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the mock DoH endpoint answers on.
pub const DOH_PATH: &str = "/resolve";

/// Makes `server` answer MX queries for `domain` with `records`.
#[allow(dead_code)] // Used by other test files
pub async fn mount_mx(server: &MockServer, domain: &str, records: &[&str]) {
    let answers: Vec<_> = records
        .iter()
        .map(|data| json!({"name": format!("{domain}."), "type": 15, "TTL": 3600, "data": data}))
        .collect();
    let mut body = json!({"Status": 0, "TC": false, "RD": true, "RA": true});
    if !answers.is_empty() {
        body["Answer"] = json!(answers);
    }
    Mock::given(method("GET"))
        .and(path(DOH_PATH))
        .and(query_param("name", domain))
        .and(query_param("type", "MX"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Makes `server` answer MX queries for `domain` with a DNS response code
/// and no records (3 = NXDOMAIN).
#[allow(dead_code)] // Used by other test files
pub async fn mount_rcode(server: &MockServer, domain: &str, status: u32) {
    Mock::given(method("GET"))
        .and(path(DOH_PATH))
        .and(query_param("name", domain))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Status": status})))
        .mount(server)
        .await;
}

/// Writes `contents` to a temporary input file.
#[allow(dead_code)] // Used by other test files
pub fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write CSV");
    file.flush().expect("Failed to flush file");
    file
}

/// Creates a basic Config pointed at the mock endpoint.
#[allow(dead_code)] // Used by other test files
pub fn create_test_config(input_file: PathBuf, output: PathBuf, server: &MockServer) -> Config {
    Config {
        file: input_file,
        output,
        log_level: LogLevel::Error, // Reduce noise in tests
        log_format: LogFormat::Plain,
        max_concurrency: 4,
        timeout_seconds: 5,
        doh_endpoint: format!("{}{}", server.uri(), DOH_PATH),
        dns_retries: 0,
        user_agent: "mx_filter_test/1.0".to_string(),
        ..Config::default()
    }
}
