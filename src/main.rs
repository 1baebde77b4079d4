//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mx_filter` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use mx_filter::initialization::init_logger_with;
use mx_filter::{run_filter, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; flags and defaults still apply
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_filter(config).await {
        Ok(report) => {
            println!(
                "Removed {} row{} using the excluded mail provider; kept {} of {} ({} skipped without a domain){}",
                report.removed,
                if report.removed == 1 { "" } else { "s" },
                report.kept,
                report.total_rows,
                report.skipped,
                if report.cancelled { " [cancelled, unresolved rows kept]" } else { "" }
            );
            println!("Filtered rows saved in {}", report.output_path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("mx_filter error: {:#}", e);
            process::exit(1);
        }
    }
}
