//! Character-based similarity between two normalized names, on a 0..=100 scale.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Similarity algorithm used by the reconciler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreMethod {
    /// Normalized Levenshtein ratio.
    #[default]
    Ratio,
    /// Jaro-Winkler, kinder to transposed letters and shared prefixes.
    JaroWinkler,
}

impl ScoreMethod {
    /// Score `a` against `b`. Symmetric; identical strings score 100, an empty
    /// string against a non-empty one scores 0.
    pub fn score(self, a: &str, b: &str) -> u8 {
        let similarity = match self {
            ScoreMethod::Ratio => strsim::normalized_levenshtein(a, b),
            ScoreMethod::JaroWinkler => {
                // Greedy character matching can differ by argument order.
                let (first, second) = if a <= b { (a, b) } else { (b, a) };
                strsim::jaro_winkler(first, second)
            }
        };
        to_percent(similarity)
    }
}

impl fmt::Display for ScoreMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreMethod::Ratio => write!(f, "ratio"),
            ScoreMethod::JaroWinkler => write!(f, "jaro-winkler"),
        }
    }
}

impl FromStr for ScoreMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ratio" | "levenshtein" => Ok(ScoreMethod::Ratio),
            "jaro-winkler" | "jaro_winkler" | "jw" => Ok(ScoreMethod::JaroWinkler),
            other => Err(ConfigError::UnknownScorer(other.to_string())),
        }
    }
}

/// Score with the default method.
pub fn score(a: &str, b: &str) -> u8 {
    ScoreMethod::default().score(a, b)
}

fn to_percent(similarity: f64) -> u8 {
    (similarity.clamp(0.0, 1.0) * 100.0).round() as u8
}
