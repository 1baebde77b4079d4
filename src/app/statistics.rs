//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats};
use crate::run::FilterReport;

/// Prints lookup error and row decision counts to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    let total_info = error_stats.total_info();

    if total_errors > 0 {
        info!("Lookup Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Row Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = error_stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}

/// Prints a one-line summary of the run.
pub fn print_summary(report: &FilterReport) {
    info!(
        "Removed {} row{}, kept {} ({} skipped without a domain, {} failed lookups) in {:.1}s -> {}{}",
        report.removed,
        if report.removed == 1 { "" } else { "s" },
        report.kept,
        report.skipped,
        report.failed_lookups,
        report.elapsed_seconds,
        report.output_path.display(),
        if report.cancelled { " (cancelled)" } else { "" }
    );
}
