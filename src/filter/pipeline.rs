//! Bounded-concurrency MX resolution over a dataset.

use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, info, warn};
use tokio::task::JoinHandle;

use super::{FilterOptions, FilterOutcome, ProgressCallback, ProgressEvent, RowDecision};
use crate::dataset::{Dataset, Row};
use crate::dns::MxResolver;
use crate::domain::normalize_domain;
use crate::error_handling::{categorize_resolution_failure, FilterError, InfoType, ResolutionError};

struct Lookup {
    index: usize,
    domain: String,
    result: Result<Vec<String>, ResolutionError>,
}

fn emit(progress: &ProgressCallback, event: ProgressEvent) {
    if let Some(callback) = progress {
        callback(&event);
    }
}

fn spawn_lookup(resolver: Arc<dyn MxResolver>, index: usize, domain: String) -> JoinHandle<Lookup> {
    tokio::spawn(async move {
        let result = resolver.resolve_mx(&domain).await;
        Lookup {
            index,
            domain,
            result,
        }
    })
}

/// Filters `dataset`, dropping rows whose domain's MX records match the
/// excluded provider.
///
/// Each row's `domain_column` value is normalized; rows without a usable
/// domain are skipped, every other row gets exactly one MX lookup. At most
/// `options.max_concurrency` lookups are in flight, and decisions are stored
/// by row position so the kept rows keep their input order whatever order
/// the lookups finish in.
///
/// A failed lookup is logged, counted in `options.stats` and the row is kept.
/// When `options.cancel` fires, no further lookups start, in-flight ones are
/// aborted and every row not yet resolved is kept.
///
/// # Errors
///
/// Returns [`FilterError::UnknownColumn`] if `domain_column` is not a header
/// of `dataset`. No lookup is issued in that case.
pub async fn filter_dataset(
    dataset: Dataset,
    domain_column: &str,
    resolver: Arc<dyn MxResolver>,
    options: FilterOptions,
) -> Result<FilterOutcome, FilterError> {
    let column_index = dataset
        .column_index(domain_column)
        .ok_or_else(|| FilterError::UnknownColumn(domain_column.to_string()))?;
    let FilterOptions {
        matcher,
        max_concurrency,
        cancel,
        progress,
        stats,
    } = options;

    let (headers, rows) = dataset.into_parts();
    let rows: Vec<Row> = rows
        .into_iter()
        .map(|row| {
            let domain = normalize_domain(row.get(column_index));
            row.with_normalized_domain(domain)
        })
        .collect();

    let mut decisions: Vec<RowDecision> = rows
        .iter()
        .map(|row| match row.normalized_domain() {
            Some(_) => RowDecision::Unresolved,
            None => RowDecision::Skipped,
        })
        .collect();
    let lookups: Vec<(usize, String)> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| row.normalized_domain().map(|d| (index, d.to_string())))
        .collect();

    let total_rows = rows.len();
    let skipped_count = total_rows - lookups.len();
    info!(
        "Filtering {} rows on column '{}' ({} with a domain, {} skipped, pattern '{}', concurrency {})",
        total_rows,
        domain_column,
        lookups.len(),
        skipped_count,
        matcher.pattern(),
        max_concurrency.max(1)
    );
    emit(
        &progress,
        ProgressEvent::Started {
            total_rows,
            resolvable_rows: lookups.len(),
        },
    );
    for (index, decision) in decisions.iter().enumerate() {
        if *decision == RowDecision::Skipped {
            stats.increment_info(InfoType::RowSkippedNoDomain);
            debug!("Row {} has no usable domain, skipping", index + 1);
            emit(&progress, ProgressEvent::RowSkipped { index });
        }
    }

    let limit = max_concurrency.max(1);
    let mut pending = lookups.into_iter();
    let mut tasks = FuturesUnordered::new();
    let mut cancelled = false;

    loop {
        if !cancelled && cancel.is_cancelled() {
            cancelled = true;
            info!(
                "Filtering cancelled, aborting {} in-flight lookups",
                tasks.len()
            );
            for task in tasks.iter() {
                JoinHandle::abort(task);
            }
        }

        if !cancelled {
            while tasks.len() < limit {
                let Some((index, domain)) = pending.next() else {
                    break;
                };
                tasks.push(spawn_lookup(Arc::clone(&resolver), index, domain));
            }
        }

        if tasks.is_empty() {
            break;
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled(), if !cancelled => {}
            joined = tasks.next() => {
                let Some(joined) = joined else { break };
                let Lookup { index, domain, result } = match joined {
                    Ok(lookup) => lookup,
                    Err(join_error) => {
                        if !join_error.is_cancelled() {
                            warn!("Lookup task panicked: {:?}", join_error);
                        }
                        continue;
                    }
                };

                let decision = match result {
                    Ok(records) if matcher.matches_any(&records) => {
                        debug!("Excluding {domain}: {records:?}");
                        stats.increment_info(InfoType::RowExcluded);
                        RowDecision::Excluded
                    }
                    Ok(records) => {
                        debug!("Keeping {domain}: {records:?}");
                        stats.increment_info(InfoType::RowKept);
                        RowDecision::Kept
                    }
                    Err(e) => {
                        warn!("{e}; keeping row {}", index + 1);
                        stats.increment_error(categorize_resolution_failure(&e.cause));
                        stats.increment_info(InfoType::RowKeptAfterLookupFailure);
                        RowDecision::KeptAfterLookupFailure
                    }
                };
                decisions[index] = decision;
                emit(&progress, ProgressEvent::RowResolved { index, domain, decision });
            }
        }
    }

    let unresolved_count = decisions
        .iter()
        .filter(|d| **d == RowDecision::Unresolved)
        .count();
    if cancelled {
        for _ in 0..unresolved_count {
            stats.increment_info(InfoType::LookupCancelled);
        }
        emit(
            &progress,
            ProgressEvent::Cancelled {
                unresolved: unresolved_count,
            },
        );
    }

    let removed_count = decisions
        .iter()
        .filter(|d| **d == RowDecision::Excluded)
        .count();
    let failed_lookups = decisions
        .iter()
        .filter(|d| **d == RowDecision::KeptAfterLookupFailure)
        .count();
    let kept_rows: Vec<Row> = rows
        .into_iter()
        .zip(decisions)
        .filter(|(_, decision)| decision.is_kept())
        .map(|(row, _)| row)
        .collect();
    let kept = Dataset::new(headers, kept_rows);

    info!(
        "Filtering finished: {} kept, {} removed, {} skipped, {} failed lookups{}",
        kept.len(),
        removed_count,
        skipped_count,
        failed_lookups,
        if cancelled { " (cancelled)" } else { "" }
    );
    emit(
        &progress,
        ProgressEvent::Finished {
            kept: kept.len(),
            removed: removed_count,
            skipped: skipped_count,
        },
    );

    Ok(FilterOutcome {
        kept,
        removed_count,
        skipped_count,
        failed_lookups,
        unresolved_count,
        cancelled,
    })
}
