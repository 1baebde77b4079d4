//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (fatal run errors, per-row lookup failures)
//! - Processing statistics tracking (lookup errors, row decisions)
//! - Retry strategy configuration and failure categorization

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{
    categorize_reqwest_error, categorize_resolution_failure, get_retry_strategy,
    is_retriable_failure,
};
pub use stats::ProcessingStats;
pub use types::{
    ErrorType, FilterError, InfoType, InitializationError, ResolutionError, ResolutionFailure,
};
