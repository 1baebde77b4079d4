//! The CSV-to-MX filtering pipeline.
//!
//! This module provides:
//! - [`filter_dataset`]: normalize, resolve and decide every row
//! - [`MxMatcher`]: the excluded-provider predicate
//! - Outcome, per-row decision and progress event types
//!
//! Row policy:
//! - no usable domain: skipped (neither kept nor counted as removed, never resolved)
//! - an MX record matches the excluded provider: removed
//! - lookup failed, or cancelled before resolving: kept
//! - otherwise: kept

mod matcher;
mod pipeline;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::DEFAULT_MAX_CONCURRENCY;
use crate::dataset::Dataset;
use crate::error_handling::ProcessingStats;

pub use matcher::MxMatcher;
pub use pipeline::filter_dataset;

/// What happened to one input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDecision {
    /// MX records matched the excluded provider.
    Excluded,
    /// MX records resolved and did not match.
    Kept,
    /// The lookup failed; kept rather than silently dropped.
    KeptAfterLookupFailure,
    /// No usable domain in the row.
    Skipped,
    /// Not resolved because the run was cancelled (kept).
    Unresolved,
}

impl RowDecision {
    /// Whether the row ends up in the output.
    pub fn is_kept(self) -> bool {
        matches!(
            self,
            RowDecision::Kept | RowDecision::KeptAfterLookupFailure | RowDecision::Unresolved
        )
    }
}

/// Structured progress reported while a dataset is filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Started {
        total_rows: usize,
        resolvable_rows: usize,
    },
    RowSkipped {
        index: usize,
    },
    RowResolved {
        index: usize,
        domain: String,
        decision: RowDecision,
    },
    Cancelled {
        unresolved: usize,
    },
    Finished {
        kept: usize,
        removed: usize,
        skipped: usize,
    },
}

/// Receives every [`ProgressEvent`] of a run, from the collecting task.
pub type ProgressCallback = Option<Arc<dyn Fn(&ProgressEvent) + Send + Sync>>;

/// Knobs for one pipeline invocation.
#[derive(Clone)]
pub struct FilterOptions {
    pub matcher: MxMatcher,
    /// Maximum lookups in flight (0 is treated as 1).
    pub max_concurrency: usize,
    /// Stops issuing lookups when cancelled; the partial outcome is returned.
    pub cancel: CancellationToken,
    pub progress: ProgressCallback,
    pub stats: Arc<ProcessingStats>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            matcher: MxMatcher::default(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            cancel: CancellationToken::new(),
            progress: None,
            stats: Arc::new(ProcessingStats::new()),
        }
    }
}

/// Result of filtering one dataset.
///
/// `removed_count + kept.len() + skipped_count` equals the number of input
/// rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Rows to export, in input order.
    pub kept: Dataset,
    /// Rows dropped because their mail goes to the excluded provider.
    pub removed_count: usize,
    /// Rows without a usable domain (neither kept nor removed).
    pub skipped_count: usize,
    /// Kept rows whose lookup failed.
    pub failed_lookups: usize,
    /// Kept rows never resolved because the run was cancelled.
    pub unresolved_count: usize,
    pub cancelled: bool,
}

impl FilterOutcome {
    pub fn kept_count(&self) -> usize {
        self.kept.len()
    }
}
