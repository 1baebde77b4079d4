//! One-run-at-a-time filtering sessions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use log::info;
use tokio_util::sync::CancellationToken;

use super::status::RunStatus;
use crate::columns::detect_domain_column;
use crate::config::{Config, DEFAULT_DELIMITER, DEFAULT_MAX_CONCURRENCY, DOMAIN_COLUMN_SYNONYMS};
use crate::dataset::parse_dataset;
use crate::dns::MxResolver;
use crate::error_handling::{FilterError, ProcessingStats};
use crate::filter::{
    filter_dataset, FilterOptions, FilterOutcome, MxMatcher, ProgressCallback,
    ProgressEvent,
};

/// Per-session filtering settings.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub matcher: MxMatcher,
    pub max_concurrency: usize,
    /// Accepted domain-column names, compared case-insensitively.
    pub synonyms: Vec<String>,
    /// Column to use instead of detection.
    pub domain_column: Option<String>,
    pub delimiter: u8,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            matcher: MxMatcher::default(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            synonyms: DOMAIN_COLUMN_SYNONYMS.iter().map(|s| s.to_string()).collect(),
            domain_column: None,
            delimiter: DEFAULT_DELIMITER as u8,
        }
    }
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            matcher: MxMatcher::new(&config.exclude_pattern, config.match_mode),
            max_concurrency: config.max_concurrency,
            synonyms: config.domain_column_synonyms(),
            domain_column: config.domain_column.clone(),
            delimiter: config.delimiter_byte(),
        }
    }
}

/// Runs uploaded files through the filter, one at a time.
///
/// Submitting a file while another is still being filtered cancels the
/// earlier run; its late progress and result no longer touch [`RunStatus`].
pub struct FilterSession {
    resolver: Arc<dyn MxResolver>,
    settings: SessionSettings,
    generation: AtomicU64,
    current: Mutex<CancellationToken>,
    status: RunStatus,
}

impl FilterSession {
    pub fn new(resolver: Arc<dyn MxResolver>, settings: SessionSettings) -> Self {
        Self {
            resolver,
            settings,
            generation: AtomicU64::new(0),
            current: Mutex::new(CancellationToken::new()),
            status: RunStatus::new(),
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Handle on the progress of whichever run is current.
    pub fn status(&self) -> RunStatus {
        self.status.clone()
    }

    /// Cancels the run in flight, if any. Its partial outcome is still returned
    /// to the caller of [`FilterSession::process`].
    pub fn cancel(&self) {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel();
    }

    /// Parses `input`, picks the domain column and filters the rows.
    ///
    /// The domain column is resolved before any lookup: a missing column fails
    /// with [`FilterError::NoDomainColumnFound`] (or
    /// [`FilterError::UnknownColumn`] for a configured column) without
    /// touching the network.
    ///
    /// # Errors
    ///
    /// Returns a [`FilterError`] when the input cannot be parsed, is empty or
    /// has no usable domain column.
    pub async fn process(&self, input: &[u8]) -> Result<FilterOutcome, FilterError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel = {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            current.cancel();
            *current = CancellationToken::new();
            current.clone()
        };
        let stats = Arc::new(ProcessingStats::new());
        self.status.begin(generation, Arc::clone(&stats));

        let result = self.run(generation, input, cancel, stats).await;
        if self.generation.load(Ordering::SeqCst) != generation {
            info!("Run {generation} was superseded, discarding its result");
        }
        self.status.finish(generation, &result);
        result
    }

    async fn run(
        &self,
        generation: u64,
        input: &[u8],
        cancel: CancellationToken,
        stats: Arc<ProcessingStats>,
    ) -> Result<FilterOutcome, FilterError> {
        let dataset = parse_dataset(input, self.settings.delimiter)?;

        let column = match &self.settings.domain_column {
            Some(name) => detect_domain_column(dataset.headers(), &[name])
                .ok_or_else(|| FilterError::UnknownColumn(name.clone()))?,
            None => detect_domain_column(dataset.headers(), &self.settings.synonyms).ok_or_else(
                || FilterError::NoDomainColumnFound {
                    accepted: self.settings.synonyms.clone(),
                },
            )?,
        };
        info!(
            "Using column '{}' for domains ({} rows)",
            column,
            dataset.len()
        );

        let status = self.status.clone();
        let progress: ProgressCallback =
            Some(Arc::new(move |event: &ProgressEvent| {
                status.apply(generation, event)
            }));
        let options = FilterOptions {
            matcher: self.settings.matcher.clone(),
            max_concurrency: self.settings.max_concurrency,
            cancel,
            progress,
            stats,
        };
        filter_dataset(dataset, &column, Arc::clone(&self.resolver), options).await
    }
}
