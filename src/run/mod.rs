//! Running the filter: sessions, observable run state and the CLI entry point.

mod session;
mod status;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::app::{log_progress, print_error_statistics, print_summary, shutdown_gracefully};
use crate::config::{Config, LOGGING_INTERVAL, STATUS_SERVER_LOGGING_INTERVAL_SECS};
use crate::export::export_csv;
use crate::initialization::{init_client, init_resolver};
use crate::status_server::{start_status_server, StatusState};

pub use session::{FilterSession, SessionSettings};
pub use status::{RunSnapshot, RunState, RunStatus};

/// Results of a filtering run.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterReport {
    /// Data rows in the input file
    pub total_rows: usize,
    /// Rows written to the output file
    pub kept: usize,
    /// Rows removed because their mail goes to the excluded provider
    pub removed: usize,
    /// Rows without a usable domain (not written, not counted as removed)
    pub skipped: usize,
    /// Kept rows whose MX lookup failed
    pub failed_lookups: usize,
    /// True when the run was interrupted; unresolved rows were kept
    pub cancelled: bool,
    /// Where the kept rows were written
    pub output_path: PathBuf,
    pub elapsed_seconds: f64,
}

fn spawn_progress_logger(
    status: RunStatus,
    cancel: CancellationToken,
    interval_secs: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        // The first tick completes immediately
        interval.tick().await;
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    log_progress(&status.snapshot());
                }
                _ = cancel.cancelled() => {
                    break;
                }
            }
        }
    })
}

fn spawn_interrupt_handler(session: Arc<FilterSession>, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                match signal {
                    Ok(()) => {
                        warn!("Interrupted, cancelling outstanding lookups (unresolved rows are kept)");
                        session.cancel();
                    }
                    Err(e) => warn!("Failed to listen for Ctrl-C: {e}"),
                }
            }
            _ = cancel.cancelled() => {}
        }
    })
}

/// Filters the CSV file named by `config.file` and writes the kept rows to
/// `config.output`.
///
/// This is the entry point of the binary. Besides filtering it logs progress
/// periodically, serves `/status` and `/metrics` when `status_port` is set,
/// and cancels outstanding lookups on Ctrl-C (the partial result is still
/// written).
///
/// # Errors
///
/// Returns an error if the input file cannot be read, the HTTP client or
/// resolver cannot be built, the file has no usable domain column or cannot
/// be parsed, or the output cannot be written.
///
/// # Example
///
/// ```no_run
/// use mx_filter::{run_filter, Config};
/// use std::path::PathBuf;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     file: PathBuf::from("contacts.csv"),
///     ..Default::default()
/// };
/// let report = run_filter(config).await?;
/// println!("Removed {} rows", report.removed);
/// # Ok(())
/// # }
/// ```
pub async fn run_filter(config: Config) -> Result<FilterReport> {
    let start_time = Instant::now();

    let input = tokio::fs::read(&config.file)
        .await
        .with_context(|| format!("Failed to read input file {}", config.file.display()))?;
    let client = init_client(&config).context("Failed to initialize HTTP client")?;
    let resolver = init_resolver(client, &config).context("Failed to initialize MX resolver")?;

    let session = Arc::new(FilterSession::new(
        resolver,
        SessionSettings::from_config(&config),
    ));
    let status = session.status();

    if let Some(port) = config.status_port {
        let state = StatusState::new(status.clone());
        tokio::spawn(async move {
            if let Err(e) = start_status_server(port, state).await {
                warn!("Status server error: {}", e);
            }
        });
    }

    let cancel = CancellationToken::new();
    let logging_interval = if config.status_port.is_some() {
        STATUS_SERVER_LOGGING_INTERVAL_SECS
    } else {
        LOGGING_INTERVAL
    };
    let background = vec![
        spawn_progress_logger(status.clone(), cancel.child_token(), logging_interval),
        spawn_interrupt_handler(Arc::clone(&session), cancel.child_token()),
    ];

    info!("Filtering {}", config.file.display());
    let result = session.process(&input).await;
    shutdown_gracefully(cancel, background).await;

    let outcome = result.with_context(|| format!("Failed to filter {}", config.file.display()))?;
    log_progress(&status.snapshot());

    export_csv(&outcome.kept, &config.output, config.delimiter_byte())?;
    print_error_statistics(&status.stats());

    let report = FilterReport {
        total_rows: outcome.kept_count() + outcome.removed_count + outcome.skipped_count,
        kept: outcome.kept_count(),
        removed: outcome.removed_count,
        skipped: outcome.skipped_count,
        failed_lookups: outcome.failed_lookups,
        cancelled: outcome.cancelled,
        output_path: config.output.clone(),
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
    };
    print_summary(&report);
    Ok(report)
}
