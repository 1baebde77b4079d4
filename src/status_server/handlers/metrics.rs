//! Prometheus metrics handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::super::types::{percentage_complete, rate_per_second, StatusState};
use crate::run::RunState;

/// Prometheus-compatible metrics endpoint
pub async fn metrics_handler(State(state): State<StatusState>) -> Response {
    let run = state.status.snapshot();
    let stats = state.status.stats();
    let running = u8::from(run.state == RunState::Running);

    let metrics = format!(
        r#"# HELP mx_filter_running Whether a run is in progress (1) or not (0)
# TYPE mx_filter_running gauge
mx_filter_running {}

# HELP mx_filter_total_rows Data rows in the current input
# TYPE mx_filter_total_rows gauge
mx_filter_total_rows {}

# HELP mx_filter_processed_rows Rows whose MX lookup has finished
# TYPE mx_filter_processed_rows gauge
mx_filter_processed_rows {}

# HELP mx_filter_kept_rows Rows kept so far
# TYPE mx_filter_kept_rows gauge
mx_filter_kept_rows {}

# HELP mx_filter_removed_rows Rows removed because their mail goes to the excluded provider
# TYPE mx_filter_removed_rows gauge
mx_filter_removed_rows {}

# HELP mx_filter_skipped_rows Rows without a usable domain
# TYPE mx_filter_skipped_rows gauge
mx_filter_skipped_rows {}

# HELP mx_filter_percentage_complete Percentage of lookups completed (0-100)
# TYPE mx_filter_percentage_complete gauge
mx_filter_percentage_complete {}

# HELP mx_filter_rate_per_second Lookups completed per second
# TYPE mx_filter_rate_per_second gauge
mx_filter_rate_per_second {}

# HELP mx_filter_lookup_errors_total Failed MX lookups
# TYPE mx_filter_lookup_errors_total counter
mx_filter_lookup_errors_total {}
"#,
        running,
        run.total_rows,
        run.processed_rows,
        run.kept,
        run.removed,
        run.skipped,
        percentage_complete(&run),
        rate_per_second(&run),
        stats.total_errors()
    );

    (StatusCode::OK, metrics).into_response()
}
