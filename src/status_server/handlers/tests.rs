use std::sync::Arc;

use axum::body::to_bytes;
use axum::extract::State;
use axum::http::StatusCode;

use super::{metrics_handler, status_handler};
use crate::error_handling::{ErrorType, ProcessingStats};
use crate::filter::{ProgressEvent, RowDecision};
use crate::run::RunStatus;
use crate::status_server::StatusState;

fn running_state() -> StatusState {
    let status = RunStatus::new();
    let stats = Arc::new(ProcessingStats::new());
    stats.increment_error(ErrorType::DnsNxDomain);
    stats.increment_error(ErrorType::DnsTimeoutError);
    status.begin(1, stats);
    status.apply(
        1,
        &ProgressEvent::Started {
            total_rows: 5,
            resolvable_rows: 4,
        },
    );
    status.apply(
        1,
        &ProgressEvent::RowResolved {
            index: 0,
            domain: "a.com".into(),
            decision: RowDecision::Excluded,
        },
    );
    StatusState::new(status)
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

#[tokio::test]
async fn test_status_handler_reports_run() {
    let response = status_handler(State(running_state())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value =
        serde_json::from_str(&body_text(response).await).expect("valid JSON");
    assert_eq!(json["state"], "running");
    assert_eq!(json["total_rows"], 5);
    assert_eq!(json["processed_rows"], 1);
    assert_eq!(json["removed"], 1);
    assert_eq!(json["percentage_complete"], 25.0);
    assert_eq!(json["errors"]["total"], 2);
    assert_eq!(json["errors"]["nxdomain"], 1);
    assert_eq!(json["errors"]["timeout"], 1);
}

#[tokio::test]
async fn test_status_handler_when_idle() {
    let response = status_handler(State(StatusState::new(RunStatus::new()))).await;
    let json: serde_json::Value =
        serde_json::from_str(&body_text(response).await).expect("valid JSON");
    assert_eq!(json["state"], "idle");
    assert_eq!(json["percentage_complete"], 0.0);
}

#[tokio::test]
async fn test_metrics_handler_prometheus_text() {
    let response = metrics_handler(State(running_state())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = body_text(response).await;
    assert!(text.contains("# TYPE mx_filter_removed_rows gauge"));
    assert!(text.contains("mx_filter_running 1\n"));
    assert!(text.contains("mx_filter_total_rows 5\n"));
    assert!(text.contains("mx_filter_removed_rows 1\n"));
    assert!(text.contains("mx_filter_lookup_errors_total 2\n"));
}
