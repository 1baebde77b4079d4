//! JSON status handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::super::types::{
    percentage_complete, rate_per_second, ErrorCounts, StatusResponse, StatusState,
};

/// JSON status endpoint with the run state and progress
pub async fn status_handler(State(state): State<StatusState>) -> Response {
    let run = state.status.snapshot();
    let stats = state.status.stats();

    let response = StatusResponse {
        percentage_complete: percentage_complete(&run),
        rate_per_second: rate_per_second(&run),
        errors: ErrorCounts::from_stats(&stats),
        run,
    };

    let json = match serde_json::to_string_pretty(&response) {
        Ok(json) => json,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialize status: {}", e),
            )
                .into_response();
        }
    };

    (StatusCode::OK, [("content-type", "application/json")], json).into_response()
}
