//! File-to-report workflow shared by the CLI and library callers.
//!
//! Decoding of both inputs happens here; the matching itself is delegated to
//! [`crate::reconcile`], which never touches the filesystem.

use crate::config::ReconcileConfig;
use crate::dates::{find_gazette_date, format_date};
use crate::document::read_document_text;
use crate::extract::extract_candidates;
use crate::reconcile::reconcile_with_cancel;
use crate::report::MatchReport;
use crate::sheet::read_records;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

/// Inputs for one match run.
#[derive(Debug, Clone)]
pub struct MatchJob {
    /// Spreadsheet of deceased persons (CSV or workbook)
    pub sheet: PathBuf,
    /// Gazette document (PDF or text)
    pub document: PathBuf,
    /// Reconciliation settings
    pub config: ReconcileConfig,
}

/// Run the whole pipeline: read both files, extract candidates, derive the
/// gazette date unless one was configured, and reconcile.
///
/// Raising `cancel` aborts between records; nothing partial is returned.
pub fn run_match(job: &MatchJob, cancel: &AtomicBool) -> Result<MatchReport> {
    let set = read_records(&job.sheet)?;
    set.require_column(&job.config.name_column)?;
    if set.is_empty() {
        log::warn!("Sheet {} has no data rows", job.sheet.display());
    }

    let text = read_document_text(&job.document)?;
    let candidates = extract_candidates(&text);
    log::info!("Gazette names extracted: {}", candidates.len());

    let gazette_date = job.config.gazette_date.or_else(|| find_gazette_date(&text));
    match gazette_date {
        Some(date) => log::info!("Gazette date: {}", format_date(date)),
        None => log::debug!("No gazette date found in document"),
    }
    let config = job.config.clone().with_gazette_date(gazette_date);

    let matched = reconcile_with_cancel(&set.records, &candidates, &config, cancel)?;
    log::info!("Matching complete: {} records emitted", matched.len());

    Ok(MatchReport {
        matched,
        records_read: set.len(),
        candidate_count: candidates.len(),
        gazette_date: gazette_date.map(format_date),
    })
}
