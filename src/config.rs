//! Reconciliation settings passed explicitly into the pipeline.

use crate::dates::parse_date;
use crate::error::ConfigError;
use crate::score::ScoreMethod;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Spreadsheet column holding the deceased person's name.
pub const DEFAULT_NAME_COLUMN: &str = "Name of The Deceased";

/// Minimum accepted similarity score, always within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Threshold(u8);

impl Threshold {
    pub const MAX: Threshold = Threshold(100);

    pub fn new(value: i64) -> Result<Self, ConfigError> {
        if (0..=100).contains(&value) {
            Ok(Threshold(value as u8))
        } else {
            Err(ConfigError::ThresholdOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn accepts(self, score: u8) -> bool {
        score >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::MAX
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Threshold {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidThreshold(s.to_string()))?;
        Threshold::new(value)
    }
}

/// Which records the reconciler emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Emit only records scoring at or above the threshold.
    #[default]
    Filter,
    /// Emit every record, marking exact matches as approved.
    AnnotateAll,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Filter => write!(f, "filter"),
            MatchMode::AnnotateAll => write!(f, "annotate"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "filter" => Ok(MatchMode::Filter),
            "annotate" | "annotate-all" | "all" => Ok(MatchMode::AnnotateAll),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Configuration for a reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// Minimum score for a confirmed match
    pub threshold: Threshold,
    /// Filter or annotate-all output policy
    pub mode: MatchMode,
    /// Similarity algorithm
    pub method: ScoreMethod,
    /// Spreadsheet column holding the name
    pub name_column: String,
    /// Date stamped on approved records; `None` uses the run date
    pub approval_date: Option<NaiveDate>,
    /// Document-wide notice date attached to every emitted record
    pub gazette_date: Option<NaiveDate>,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            threshold: Threshold::default(),
            mode: MatchMode::default(),
            method: ScoreMethod::default(),
            name_column: DEFAULT_NAME_COLUMN.to_string(),
            approval_date: None,
            gazette_date: None,
        }
    }
}

impl ReconcileConfig {
    /// Annotate-all configuration with the default threshold.
    pub fn annotate_all() -> Self {
        Self {
            mode: MatchMode::AnnotateAll,
            ..Self::default()
        }
    }

    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_method(mut self, method: ScoreMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_name_column(mut self, column: impl Into<String>) -> Self {
        self.name_column = column.into();
        self
    }

    pub fn with_approval_date(mut self, date: NaiveDate) -> Self {
        self.approval_date = Some(date);
        self
    }

    /// Parse and set the approval date from `DD/MM/YYYY` text.
    pub fn with_approval_date_str(self, text: &str) -> Result<Self, ConfigError> {
        let date = parse_date(text).ok_or_else(|| ConfigError::InvalidDate(text.to_string()))?;
        Ok(self.with_approval_date(date))
    }

    pub fn with_gazette_date(mut self, date: Option<NaiveDate>) -> Self {
        self.gazette_date = date;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_range() {
        assert_eq!(Threshold::new(0).unwrap().value(), 0);
        assert_eq!(Threshold::new(100).unwrap().value(), 100);
        assert_eq!(
            Threshold::new(101),
            Err(ConfigError::ThresholdOutOfRange(101))
        );
        assert_eq!(Threshold::new(-1), Err(ConfigError::ThresholdOutOfRange(-1)));
    }

    #[test]
    fn test_threshold_parse() {
        assert_eq!("85".parse::<Threshold>().unwrap().value(), 85);
        assert_eq!(" 0 ".parse::<Threshold>().unwrap().value(), 0);
        assert_eq!(
            "abc".parse::<Threshold>(),
            Err(ConfigError::InvalidThreshold("abc".to_string()))
        );
        assert_eq!(
            "250".parse::<Threshold>(),
            Err(ConfigError::ThresholdOutOfRange(250))
        );
    }

    #[test]
    fn test_threshold_accepts() {
        let t = Threshold::new(90).unwrap();
        assert!(t.accepts(90));
        assert!(t.accepts(100));
        assert!(!t.accepts(89));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("filter".parse::<MatchMode>().unwrap(), MatchMode::Filter);
        assert_eq!("Annotate".parse::<MatchMode>().unwrap(), MatchMode::AnnotateAll);
        assert!("everything".parse::<MatchMode>().is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = ReconcileConfig::default();
        assert_eq!(config.threshold.value(), 100);
        assert_eq!(config.mode, MatchMode::Filter);
        assert_eq!(config.name_column, DEFAULT_NAME_COLUMN);

        let annotate = ReconcileConfig::annotate_all();
        assert_eq!(annotate.mode, MatchMode::AnnotateAll);
    }

    #[test]
    fn test_approval_date_str() {
        let config = ReconcileConfig::default()
            .with_approval_date_str("05/06/2025")
            .unwrap();
        assert_eq!(config.approval_date, NaiveDate::from_ymd_opt(2025, 6, 5));

        assert!(matches!(
            ReconcileConfig::default().with_approval_date_str("2025-13-45"),
            Err(ConfigError::InvalidDate(_))
        ));
    }
}
