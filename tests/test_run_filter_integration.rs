//! Integration tests for run_filter
//!
//! These tests drive the whole path (file on disk, DoH lookups against a
//! wiremock endpoint, CSV written back out) the way the binary does.

mod helpers;

use helpers::{create_test_config, mount_mx, mount_rcode, write_csv};
use mx_filter::{run_filter, MatchMode};
use tempfile::TempDir;
use wiremock::MockServer;

const OUTLOOK_MX: &str = "0 outlook-com.mail.protection.outlook.com.";
const OTHER_MX: &str = "10 mx.exampleisp.com.";

fn read_output(path: &std::path::Path) -> String {
    std::fs::read_to_string(path).expect("output file should exist")
}

#[tokio::test]
async fn test_run_filter_removes_outlook_rows() {
    let server = MockServer::start().await;
    mount_mx(&server, "outlook.com", &[OUTLOOK_MX]).await;
    mount_mx(&server, "google.com", &[]).await;

    let input = write_csv("domain,company\noutlook.com,A\ngoogle.com,B\n");
    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("filtered.csv");
    let config = create_test_config(input.path().to_path_buf(), output.clone(), &server);

    let report = run_filter(config).await.expect("run should succeed");

    assert_eq!(report.removed, 1);
    assert_eq!(report.kept, 1);
    assert_eq!(report.total_rows, 2);
    assert!(!report.cancelled);
    assert_eq!(report.output_path, output);
    assert_eq!(read_output(&output), "domain,company\ngoogle.com,B\n");
}

#[tokio::test]
async fn test_run_filter_without_domain_column_makes_no_requests() {
    let server = MockServer::start().await;
    let input = write_csv("name,phone\nAcme,555-0100\nBeta,555-0101\n");
    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("filtered.csv");
    let config = create_test_config(input.path().to_path_buf(), output.clone(), &server);

    let err = run_filter(config).await.expect_err("no domain column");

    let msg = format!("{err:#}");
    assert!(msg.contains("domain"), "unexpected error: {msg}");
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_run_filter_skip_and_failure_policy() {
    let server = MockServer::start().await;
    mount_mx(&server, "a.com", &[OUTLOOK_MX]).await;
    mount_mx(&server, "b.com", &["5 b-com.mail.protection.outlook.com."]).await;
    mount_mx(&server, "c.com", &[OTHER_MX]).await;
    mount_rcode(&server, "d.com", 3).await;

    let input = write_csv(
        "Website,Company\n\
         https://www.a.com/,A\n\
         ,Blank\n\
         b.com,B\n\
         WWW.C.COM,C\n\
         d.com,D\n",
    );
    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("out.csv");
    let config = create_test_config(input.path().to_path_buf(), output.clone(), &server);

    let report = run_filter(config).await.expect("run should succeed");

    assert_eq!(report.removed, 2);
    assert_eq!(report.kept, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed_lookups, 1);
    assert_eq!(report.total_rows, 5);
    assert_eq!(read_output(&output), "Website,Company\nWWW.C.COM,C\nd.com,D\n");
}

#[tokio::test]
async fn test_run_filter_semicolon_delimiter_and_quoting() {
    let server = MockServer::start().await;
    mount_mx(&server, "acme.com", &[OTHER_MX]).await;
    mount_mx(&server, "beta.com", &[OUTLOOK_MX]).await;

    let input = write_csv("company;domain\n\"Acme; Inc\";acme.com\nBeta;beta.com\n");
    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("out.csv");
    let mut config = create_test_config(input.path().to_path_buf(), output.clone(), &server);
    config.delimiter = ';';

    let report = run_filter(config).await.expect("run should succeed");

    assert_eq!(report.removed, 1);
    assert_eq!(read_output(&output), "company;domain\n\"Acme; Inc\";acme.com\n");
}

#[tokio::test]
async fn test_run_filter_host_suffix_mode() {
    let server = MockServer::start().await;
    mount_mx(&server, "real.com", &[OUTLOOK_MX]).await;
    mount_mx(&server, "fans.com", &["10 mx.outlook-fans.net."]).await;

    let input = write_csv("domain\nreal.com\nfans.com\n");
    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("out.csv");
    let mut config = create_test_config(input.path().to_path_buf(), output.clone(), &server);
    config.exclude_pattern = "outlook.com".to_string();
    config.match_mode = MatchMode::HostSuffix;

    let report = run_filter(config).await.expect("run should succeed");

    assert_eq!(report.removed, 1);
    assert_eq!(read_output(&output), "domain\nfans.com\n");
}

#[tokio::test]
async fn test_run_filter_extra_column_synonym() {
    let server = MockServer::start().await;
    mount_mx(&server, "acme.com", &[OUTLOOK_MX]).await;

    let input = write_csv("Name,Shop Address\nAcme,acme.com\n");
    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("out.csv");
    let mut config = create_test_config(input.path().to_path_buf(), output.clone(), &server);
    config.column_synonyms = vec!["shop address".to_string()];

    let report = run_filter(config).await.expect("run should succeed");

    assert_eq!(report.removed, 1);
    assert_eq!(read_output(&output), "Name,Shop Address\n");
}

#[tokio::test]
async fn test_run_filter_empty_file_is_error() {
    let server = MockServer::start().await;
    let input = write_csv("domain,company\n");
    let dir = TempDir::new().expect("temp dir");
    let output = dir.path().join("out.csv");
    let config = create_test_config(input.path().to_path_buf(), output.clone(), &server);

    let err = run_filter(config).await.expect_err("header only");
    assert!(format!("{err:#}").contains("empty"));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_run_filter_missing_input_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("temp dir");
    let config = create_test_config(
        dir.path().join("does-not-exist.csv"),
        dir.path().join("out.csv"),
        &server,
    );

    let err = run_filter(config).await.expect_err("missing file");
    assert!(err.to_string().contains("Failed to read input file"));
}
