//! Observable state of the current run.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error_handling::{FilterError, ProcessingStats};
use crate::filter::{FilterOutcome, ProgressEvent, RowDecision};

/// Processing state shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Done,
    Error,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Done => "done",
            RunState::Error => "error",
        }
    }
}

/// Point-in-time copy of the run's state and counts.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RunSnapshot {
    pub state: RunState,
    pub total_rows: usize,
    /// Rows with a usable domain, i.e. rows that need a lookup.
    pub resolvable_rows: usize,
    /// Lookups finished so far (successful or not).
    pub processed_rows: usize,
    pub kept: usize,
    pub removed: usize,
    pub skipped: usize,
    pub failed_lookups: usize,
    pub cancelled: bool,
    /// Message of the error that ended the run, when `state` is `error`.
    pub error: Option<String>,
    pub elapsed_seconds: f64,
}

#[derive(Default)]
struct Progress {
    generation: u64,
    snapshot: RunSnapshot,
    started: Option<Instant>,
    elapsed: Option<Duration>,
    stats: Arc<ProcessingStats>,
}

/// Shared, cloneable handle on the current run's progress.
///
/// Updates carry the generation of the run they belong to; updates from a
/// superseded run are dropped.
#[derive(Clone, Default)]
pub struct RunStatus {
    inner: Arc<RwLock<Progress>>,
}

impl RunStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state and counts.
    pub fn snapshot(&self) -> RunSnapshot {
        let progress = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut snapshot = progress.snapshot.clone();
        snapshot.elapsed_seconds = match (progress.elapsed, progress.started) {
            (Some(elapsed), _) => elapsed.as_secs_f64(),
            (None, Some(started)) => started.elapsed().as_secs_f64(),
            (None, None) => 0.0,
        };
        snapshot
    }

    /// Lookup failure and row decision counters of the current run.
    pub fn stats(&self) -> Arc<ProcessingStats> {
        let progress = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&progress.stats)
    }

    pub(crate) fn begin(&self, generation: u64, stats: Arc<ProcessingStats>) {
        let mut progress = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *progress = Progress {
            generation,
            snapshot: RunSnapshot {
                state: RunState::Running,
                ..RunSnapshot::default()
            },
            started: Some(Instant::now()),
            elapsed: None,
            stats,
        };
    }

    pub(crate) fn apply(&self, generation: u64, event: &ProgressEvent) {
        let mut progress = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if progress.generation != generation {
            return;
        }
        let snapshot = &mut progress.snapshot;
        match event {
            ProgressEvent::Started {
                total_rows,
                resolvable_rows,
            } => {
                snapshot.total_rows = *total_rows;
                snapshot.resolvable_rows = *resolvable_rows;
            }
            ProgressEvent::RowSkipped { .. } => snapshot.skipped += 1,
            ProgressEvent::RowResolved { decision, .. } => {
                snapshot.processed_rows += 1;
                match decision {
                    RowDecision::Excluded => snapshot.removed += 1,
                    RowDecision::Kept => snapshot.kept += 1,
                    RowDecision::KeptAfterLookupFailure => {
                        snapshot.kept += 1;
                        snapshot.failed_lookups += 1;
                    }
                    RowDecision::Skipped | RowDecision::Unresolved => {}
                }
            }
            ProgressEvent::Cancelled { unresolved } => {
                snapshot.cancelled = true;
                snapshot.kept += unresolved;
            }
            ProgressEvent::Finished {
                kept,
                removed,
                skipped,
            } => {
                snapshot.kept = *kept;
                snapshot.removed = *removed;
                snapshot.skipped = *skipped;
            }
        }
    }

    pub(crate) fn finish(&self, generation: u64, result: &Result<FilterOutcome, FilterError>) {
        let mut progress = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if progress.generation != generation {
            return;
        }
        progress.elapsed = progress.started.map(|started| started.elapsed());
        let snapshot = &mut progress.snapshot;
        match result {
            Ok(outcome) => {
                snapshot.state = RunState::Done;
                snapshot.kept = outcome.kept_count();
                snapshot.removed = outcome.removed_count;
                snapshot.skipped = outcome.skipped_count;
                snapshot.failed_lookups = outcome.failed_lookups;
                snapshot.cancelled = outcome.cancelled;
            }
            Err(e) => {
                snapshot.state = RunState::Error;
                snapshot.error = Some(e.to_string());
            }
        }
    }
}
