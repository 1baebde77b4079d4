//! Progress logging utilities.

use log::info;

use crate::run::RunSnapshot;

/// Logs how far the current run has got.
pub fn log_progress(snapshot: &RunSnapshot) {
    let elapsed_secs = snapshot.elapsed_seconds;
    let rate = if elapsed_secs > 0.0 {
        snapshot.processed_rows as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Resolved {}/{} domains in {:.2} seconds (~{:.2} lookups/sec): {} kept, {} removed, {} skipped",
        snapshot.processed_rows,
        snapshot.resolvable_rows,
        elapsed_secs,
        rate,
        snapshot.kept,
        snapshot.removed,
        snapshot.skipped
    );
}
