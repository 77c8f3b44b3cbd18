//! Notice date detection and the `DD/MM/YYYY` format used in reports.

use chrono::NaiveDate;
use regex::{Captures, Regex};

/// Date format for approval and gazette dates in output.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

const MONTHS: &str = concat!(
    "january|february|march|april|may|june|",
    "july|august|september|october|november|december"
);

lazy_static::lazy_static! {
    // "5th June, 2025" / "5 June 2025"
    static ref DAY_MONTH_YEAR: Regex = Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+({}),?\s+(\d{{4}})\b",
        MONTHS
    )).unwrap();
    // "June 5, 2025"
    static ref MONTH_DAY_YEAR: Regex = Regex::new(&format!(
        r"(?i)\b({})\s+(\d{{1,2}})(?:st|nd|rd|th)?,?\s+(\d{{4}})\b",
        MONTHS
    )).unwrap();
    // "05/06/2025", day first
    static ref NUMERIC: Regex = Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b").unwrap();
}

/// Parse a `DD/MM/YYYY` date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Find the earliest recognizable calendar date in the document text.
///
/// Gazette notices carry their publication date near the top, so the first
/// valid date wins. Matches that do not form a real date (31/02/2025) are
/// skipped.
pub fn find_gazette_date(text: &str) -> Option<NaiveDate> {
    let mut found: Vec<(usize, NaiveDate)> = Vec::new();

    for caps in DAY_MONTH_YEAR.captures_iter(text) {
        if let Some(date) = build_date(&caps, 3, 2, 1) {
            found.push((start_of(&caps), date));
        }
    }
    for caps in MONTH_DAY_YEAR.captures_iter(text) {
        if let Some(date) = build_date(&caps, 3, 1, 2) {
            found.push((start_of(&caps), date));
        }
    }
    for caps in NUMERIC.captures_iter(text) {
        if let Some(date) = build_date(&caps, 3, 2, 1) {
            found.push((start_of(&caps), date));
        }
    }

    found.into_iter().min_by_key(|(pos, _)| *pos).map(|(_, date)| date)
}

fn start_of(caps: &Captures) -> usize {
    caps.get(0).map(|m| m.start()).unwrap_or(0)
}

fn build_date(
    caps: &Captures,
    year_idx: usize,
    month_idx: usize,
    day_idx: usize,
) -> Option<NaiveDate> {
    let year: i32 = caps.get(year_idx)?.as_str().parse().ok()?;
    let month = month_number(caps.get(month_idx)?.as_str())?;
    let day: u32 = caps.get(day_idx)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Month number from a name or a numeric string.
fn month_number(text: &str) -> Option<u32> {
    if let Ok(n) = text.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    let lower = text.to_ascii_lowercase();
    MONTHS
        .split('|')
        .position(|m| m == lower)
        .map(|i| i as u32 + 1)
}
