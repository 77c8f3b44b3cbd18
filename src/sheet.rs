//! Decode the deceased-estates spreadsheet into [`InputRecord`]s.
//!
//! CSV files go through the `csv` reader; Excel and OpenDocument workbooks go
//! through calamine, reading the first worksheet. In both cases the first row
//! holds the headers.

use crate::error::InputError;
use crate::record::{header_eq, InputRecord};
use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::path::Path;

/// Header row plus data rows of one sheet.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub headers: Vec<String>,
    pub records: Vec<InputRecord>,
}

impl RecordSet {
    /// Check that the header row carries `column`.
    pub fn require_column(&self, column: &str) -> Result<(), InputError> {
        if self.headers.iter().any(|h| header_eq(h, column)) {
            Ok(())
        } else {
            Err(InputError::MissingNameColumn {
                column: column.to_string(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read records from a `.csv`, `.xlsx`, `.xlsm`, `.xls`, `.xlsb` or `.ods` file.
pub fn read_records(path: &Path) -> Result<RecordSet> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let set = match ext.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => read_workbook(path)?,
        _ => anyhow::bail!("Unsupported spreadsheet type: {}", path.display()),
    };

    log::info!(
        "Read {} rows with {} columns from {}",
        set.records.len(),
        set.headers.len(),
        path.display()
    );
    Ok(set)
}

fn read_csv(path: &Path) -> Result<RecordSet> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.context("Failed to read CSV row")?;
        let record = build_record(&headers, row.iter().map(|s| s.to_string()));
        if !record.is_empty() {
            records.push(record);
        }
    }

    Ok(RecordSet { headers, records })
}

fn read_workbook(path: &Path) -> Result<RecordSet> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook {}", path.display()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Workbook {} contains no sheets", path.display()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet '{}'", sheet_name))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(|c| cell_text(c).trim().to_string()).collect(),
        None => return Ok(RecordSet::default()),
    };

    let records = rows
        .map(|row| build_record(&headers, row.iter().map(cell_text)))
        .filter(|r| !r.is_empty())
        .collect();

    Ok(RecordSet { headers, records })
}

/// Pair cells with headers, skipping empty cells and unnamed columns.
fn build_record(headers: &[String], cells: impl Iterator<Item = String>) -> InputRecord {
    let mut record = InputRecord::new();
    for (header, value) in headers.iter().zip(cells) {
        if header.is_empty() || value.trim().is_empty() {
            continue;
        }
        record.push(header.clone(), value);
    }
    record
}

/// Render a workbook cell as text.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => format!("#{:?}", e),
        Data::DateTime(dt) => format!("{}", dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}
