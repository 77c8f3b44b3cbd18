//! Match every spreadsheet name against the gazette candidates.
//!
//! Records are scored in parallel against the shared, read-only candidate set.
//! Output order always follows input order.

use crate::config::{MatchMode, ReconcileConfig};
use crate::dates::format_date;
use crate::error::{InputError, ReconcileError};
use crate::extract::CandidateSet;
use crate::normalize::normalize_field;
use crate::record::{Approval, InputRecord, ReconciledRecord};
use crate::score::ScoreMethod;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Best candidate for one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub best_candidate: String,
    pub score: u8,
}

impl MatchResult {
    /// Sentinel for "nothing to compare".
    pub fn none() -> Self {
        Self {
            best_candidate: String::new(),
            score: 0,
        }
    }
}

/// Find the highest-scoring candidate for an already-normalized name.
///
/// Ties go to the candidate met first in the set's order. An empty name or an
/// empty set gives [`MatchResult::none`].
pub fn best_match(name: &str, candidates: &CandidateSet, method: ScoreMethod) -> MatchResult {
    if name.is_empty() {
        return MatchResult::none();
    }

    let mut best: Option<(&String, u8)> = None;
    for candidate in candidates {
        let score = method.score(name, candidate);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((candidate, score));
            if score == 100 {
                break;
            }
        }
    }

    match best {
        Some((candidate, score)) => MatchResult {
            best_candidate: candidate.clone(),
            score,
        },
        None => MatchResult::none(),
    }
}

/// Reconcile all records. See [`reconcile_with_cancel`].
pub fn reconcile(
    records: &[InputRecord],
    candidates: &CandidateSet,
    config: &ReconcileConfig,
) -> Result<Vec<ReconciledRecord>, ReconcileError> {
    let never = AtomicBool::new(false);
    reconcile_with_cancel(records, candidates, config, &never)
}

/// Reconcile all records, checking `cancel` before each one.
///
/// Fails with [`InputError::MissingNameColumn`] before any scoring when the
/// records are non-empty and none carries a non-empty name in the name column. Once `cancel` is
/// raised the run stops and returns [`ReconcileError::Cancelled`]; partial
/// results are dropped.
pub fn reconcile_with_cancel(
    records: &[InputRecord],
    candidates: &CandidateSet,
    config: &ReconcileConfig,
    cancel: &AtomicBool,
) -> Result<Vec<ReconciledRecord>, ReconcileError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }
    let has_name = records
        .iter()
        .any(|r| !normalize_field(r.get(&config.name_column)).is_empty());
    if !has_name {
        return Err(InputError::MissingNameColumn {
            column: config.name_column.clone(),
        }
        .into());
    }
    if candidates.is_empty() {
        log::warn!("No gazette candidates; every record will score 0");
    }

    let approval_date = format_date(
        config
            .approval_date
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
    );
    let gazette_date = config.gazette_date.map(format_date);

    let scored: Option<Vec<ReconciledRecord>> = records
        .par_iter()
        .map(|record| {
            if cancel.load(Ordering::Relaxed) {
                return None;
            }
            let excel_name = normalize_field(record.get(&config.name_column));
            let result = best_match(&excel_name, candidates, config.method);
            log::debug!(
                "'{}' -> '{}' ({})",
                excel_name,
                result.best_candidate,
                result.score
            );

            let approval = match config.mode {
                MatchMode::Filter => None,
                MatchMode::AnnotateAll => {
                    let approved = result.score == 100;
                    Some(Approval {
                        approved,
                        date: if approved {
                            approval_date.clone()
                        } else {
                            String::new()
                        },
                    })
                }
            };

            Some(ReconciledRecord {
                record: record.clone(),
                excel_name,
                gazette_match: result.best_candidate,
                score: result.score,
                gazette_date: gazette_date.clone(),
                approval,
            })
        })
        .collect();

    let scored = scored.ok_or(ReconcileError::Cancelled {
        total: records.len(),
    })?;

    let output: Vec<ReconciledRecord> = match config.mode {
        MatchMode::Filter => scored
            .into_iter()
            .filter(|r| config.threshold.accepts(r.score))
            .collect(),
        MatchMode::AnnotateAll => scored,
    };

    log::info!(
        "Reconciled {} records against {} candidates: {} emitted ({} mode, threshold {})",
        records.len(),
        candidates.len(),
        output.len(),
        config.mode,
        config.threshold
    );
    Ok(output)
}
