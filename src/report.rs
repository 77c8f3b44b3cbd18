//! Serialize reconciliation results as JSON, CSV or an Excel workbook.

use crate::record::ReconciledRecord;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Response payload of one run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub matched: Vec<ReconciledRecord>,
    pub records_read: usize,
    pub candidate_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gazette_date: Option<String>,
}

impl MatchReport {
    pub fn approved_count(&self) -> usize {
        self.matched.iter().filter(|r| r.is_approved()).count()
    }

    /// Output columns: original columns in first-seen order, then the added
    /// match columns, then optional annotations carried by any record.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for rec in &self.matched {
            for (header, _) in rec.record.fields() {
                if !columns.iter().any(|c| c == header) {
                    columns.push(header.to_string());
                }
            }
        }

        columns.push(ReconciledRecord::EXCEL_NAME.to_string());
        columns.push(ReconciledRecord::GAZETTE_MATCH.to_string());
        columns.push(ReconciledRecord::SCORE.to_string());
        if self.matched.iter().any(|r| r.gazette_date.is_some()) {
            columns.push(ReconciledRecord::GAZETTE_DATE.to_string());
        }
        if self.matched.iter().any(|r| r.approval.is_some()) {
            columns.push(ReconciledRecord::STATUS.to_string());
            columns.push(ReconciledRecord::APPROVAL_DATE.to_string());
        }
        columns
    }

    fn rows(&self, columns: &[String]) -> Vec<Vec<String>> {
        self.matched
            .iter()
            .map(|rec| {
                columns
                    .iter()
                    .map(|c| rec.column_value(c).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

/// Write the report, choosing the format from the file extension
/// (`.json`, `.csv` or `.xlsx`).
pub fn write_report(report: &MatchReport, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "json" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_json(report, std::io::BufWriter::new(file))
        }
        "csv" => write_csv(report, path),
        "xlsx" => write_xlsx(report, path),
        _ => anyhow::bail!("Unsupported output type: {}", path.display()),
    }?;

    log::info!("Wrote {} records to {}", report.matched.len(), path.display());
    Ok(())
}

/// Pretty-printed JSON.
pub fn write_json<W: Write>(report: &MatchReport, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report).context("Failed to serialize report")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn write_csv(report: &MatchReport, path: &Path) -> Result<()> {
    let columns = report.columns();
    let mut writer = csv::Writer::from_path(path).context("Failed to create output CSV")?;
    writer.write_record(&columns)?;
    for row in report.rows(&columns) {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Single-sheet workbook with a bold frozen header; approved rows are filled
/// light green and the score column is written as numbers.
pub fn write_xlsx(report: &MatchReport, path: &Path) -> Result<()> {
    use rust_xlsxwriter::{Format, Workbook};

    let columns = report.columns();
    let score_col = columns
        .iter()
        .position(|c| c == ReconciledRecord::SCORE);

    let mut workbook = Workbook::new();
    let header_fmt = Format::new().set_bold();
    let approved_fmt = Format::new().set_background_color("#C6EFCE");
    let plain_fmt = Format::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Matches")?;

    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, name, &header_fmt)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    for (i, (rec, values)) in report
        .matched
        .iter()
        .zip(report.rows(&columns))
        .enumerate()
    {
        let row = (i + 1) as u32;
        let fmt = if rec.is_approved() {
            &approved_fmt
        } else {
            &plain_fmt
        };
        for (col, value) in values.iter().enumerate() {
            if Some(col) == score_col {
                sheet.write_number_with_format(row, col as u16, rec.score as f64, fmt)?;
            } else {
                sheet.write_string_with_format(row, col as u16, value, fmt)?;
            }
        }
    }

    sheet.autofit();
    workbook
        .save(path)
        .with_context(|| format!("Failed to save workbook {}", path.display()))?;
    Ok(())
}
