//! Spreadsheet rows and reconciled output rows.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One spreadsheet row: `(header, cell text)` pairs in column order.
///
/// Empty cells are not stored. Columns other than the name column are carried
/// through to the output untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRecord {
    fields: Vec<(String, String)>,
}

impl InputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(header, value)` pairs, keeping their order.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut record = Self::new();
        for (k, v) in pairs {
            record.push(k, v);
        }
        record
    }

    /// Append a field. A repeated header replaces the earlier value in place.
    pub fn push(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(h, _)| *h == header) {
            Some(existing) => existing.1 = value,
            None => self.fields.push((header, value)),
        }
    }

    /// Look up a column; an exact header match wins, otherwise headers are
    /// compared trimmed and case-insensitively.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(h, _)| h == column)
            .or_else(|| self.fields.iter().find(|(h, _)| header_eq(h, column)))
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Header comparison used for column lookups.
pub fn header_eq(header: &str, column: &str) -> bool {
    header.trim().eq_ignore_ascii_case(column.trim())
}

impl Serialize for InputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (h, v) in &self.fields {
            map.serialize_entry(h, v)?;
        }
        map.end()
    }
}

/// Approval annotation attached in annotate-all mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approval {
    pub approved: bool,
    /// Formatted approval date, empty when not approved
    pub date: String,
}

impl Approval {
    pub const STATUS_APPROVED: &'static str = "Approved";

    pub fn status(&self) -> &'static str {
        if self.approved {
            Self::STATUS_APPROVED
        } else {
            ""
        }
    }
}

/// An input record with its best gazette match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledRecord {
    /// The original row
    pub record: InputRecord,
    /// Normalized name taken from the row
    pub excel_name: String,
    /// Best candidate from the gazette, empty if none
    pub gazette_match: String,
    /// Similarity score 0..=100
    pub score: u8,
    /// Document-wide notice date, formatted
    pub gazette_date: Option<String>,
    /// Present only in annotate-all mode
    pub approval: Option<Approval>,
}

impl ReconciledRecord {
    pub const EXCEL_NAME: &'static str = "excelName";
    pub const GAZETTE_MATCH: &'static str = "gazetteMatch";
    pub const SCORE: &'static str = "score";
    pub const GAZETTE_DATE: &'static str = "gazetteDate";
    pub const STATUS: &'static str = "status";
    pub const APPROVAL_DATE: &'static str = "approvalDate";

    pub fn is_approved(&self) -> bool {
        self.approval.as_ref().is_some_and(|a| a.approved)
    }

    /// Value of an output column, whether an original field or an added one.
    pub fn column_value(&self, column: &str) -> Option<String> {
        match column {
            Self::EXCEL_NAME => Some(self.excel_name.clone()),
            Self::GAZETTE_MATCH => Some(self.gazette_match.clone()),
            Self::SCORE => Some(self.score.to_string()),
            Self::GAZETTE_DATE => self.gazette_date.clone(),
            Self::STATUS => self.approval.as_ref().map(|a| a.status().to_string()),
            Self::APPROVAL_DATE => self.approval.as_ref().map(|a| a.date.clone()),
            _ => self
                .record
                .fields()
                .find(|(h, _)| *h == column)
                .map(|(_, v)| v.to_string()),
        }
    }
}

impl Serialize for ReconciledRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (h, v) in self.record.fields() {
            map.serialize_entry(h, v)?;
        }
        map.serialize_entry(Self::EXCEL_NAME, &self.excel_name)?;
        map.serialize_entry(Self::GAZETTE_MATCH, &self.gazette_match)?;
        map.serialize_entry(Self::SCORE, &self.score)?;
        if let Some(date) = &self.gazette_date {
            map.serialize_entry(Self::GAZETTE_DATE, date)?;
        }
        if let Some(approval) = &self.approval {
            map.serialize_entry(Self::STATUS, approval.status())?;
            map.serialize_entry(Self::APPROVAL_DATE, &approval.date)?;
        }
        map.end()
    }
}
