//! Error taxonomy for the reconciliation core.
//!
//! "No candidates" and "no records" are not errors: they produce empty or
//! all-zero results. Everything here is raised before matching starts,
//! except `Cancelled`.

use thiserror::Error;

/// Problems with the spreadsheet records themselves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("name column '{column}' is missing or has no names")]
    MissingNameColumn { column: String },
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("threshold {0} is outside 0..=100")]
    ThresholdOutOfRange(i64),

    #[error("threshold '{0}' is not an integer")]
    InvalidThreshold(String),

    #[error("invalid date '{0}', expected DD/MM/YYYY")]
    InvalidDate(String),

    #[error("unknown match mode '{0}' (expected filter or annotate)")]
    UnknownMode(String),

    #[error("unknown scorer '{0}' (expected ratio or jaro-winkler)")]
    UnknownScorer(String),
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("reconciliation of {total} records cancelled")]
    Cancelled { total: usize },
}
