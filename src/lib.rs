//! Gazette Reconcile
//!
//! Confirms which deceased persons listed in a spreadsheet are named in a
//! published gazette notice, and how confidently.
//!
//! This library provides:
//! - `normalize`: canonical form for names
//! - `extract`: candidate names from gazette text
//! - `score`: 0-100 string similarity
//! - `reconcile`: best-match selection, threshold and annotation
//! - `sheet` / `document`: spreadsheet and gazette decoding
//! - `report`: JSON, CSV and XLSX output
//! - `pipeline`: file-to-report workflow
//!
//! Binaries:
//! - `gazette-match`: command-line front end

pub mod config;
pub mod dates;
pub mod document;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod reconcile;
pub mod record;
pub mod report;
pub mod score;
pub mod sheet;

pub use config::{MatchMode, ReconcileConfig, Threshold};
pub use error::{ConfigError, InputError, ReconcileError};
pub use extract::{extract_candidates, CandidateSet};
pub use normalize::normalize;
pub use reconcile::{best_match, reconcile, reconcile_with_cancel, MatchResult};
pub use record::{InputRecord, ReconciledRecord};
pub use score::{score, ScoreMethod};
