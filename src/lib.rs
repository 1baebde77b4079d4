//! mx_filter library: drop CSV rows whose mail is hosted by a given provider
//!
//! Reads a delimited file with a header row, finds the column holding each
//! row's website or domain, looks up the domain's MX records over
//! DNS-over-HTTPS and removes the rows whose mail exchangers match the
//! excluded provider (`.outlook` by default). Kept rows are written back out
//! in their original order.
//!
//! # Example
//!
//! ```no_run
//! use mx_filter::{run_filter, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("contacts.csv"),
//!     max_concurrency: 10,
//!     ..Default::default()
//! };
//!
//! let report = run_filter(config).await?;
//! println!("Removed {} rows, kept {}", report.removed, report.kept);
//! # Ok(())
//! # }
//! ```
//!
//! The pieces are usable on their own: [`parse_dataset`],
//! [`detect_domain_column`], [`normalize_domain`] and [`filter_dataset`] with
//! any [`MxResolver`].
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
mod columns;
pub mod config;
pub mod dataset;
pub mod dns;
mod domain;
mod error_handling;
pub mod export;
pub mod filter;
pub mod initialization;
mod run;
mod status_server;

// Re-export public API
pub use columns::detect_domain_column;
pub use config::{Config, LogFormat, LogLevel, MatchMode};
pub use dataset::{parse_dataset, Dataset, Row};
pub use dns::{DohResolver, MxResolver};
pub use domain::normalize_domain;
pub use error_handling::{
    ErrorType, FilterError, InfoType, InitializationError, ProcessingStats, ResolutionError,
    ResolutionFailure,
};
pub use export::{export_csv, write_dataset};
pub use filter::{
    filter_dataset, FilterOptions, FilterOutcome, MxMatcher, ProgressCallback, ProgressEvent,
    RowDecision,
};
pub use run::{
    run_filter, FilterReport, FilterSession, RunSnapshot, RunState, RunStatus, SessionSettings,
};
pub use status_server::{start_status_server, StatusState};
