//! Candidate name extraction from gazette text.
//!
//! Two complementary passes feed one set:
//!
//! - the estate-phrase pass, which follows the notice's stereotyped wording
//!   ("to the estate of X, who died ...") and is precise when the wording is
//!   followed;
//! - the capitalized-sequence pass, which picks up any run of two or more
//!   Capitalized Words and catches names written outside that wording.
//!
//! Recall matters more than precision here: a stray candidate can only produce
//! a low-scoring match that the threshold discards later.

use crate::normalize::normalize;
use regex::Regex;
use std::collections::HashSet;

lazy_static::lazy_static! {
    static ref ESTATE_PHRASE: Regex = Regex::new(
        r"(?i)(?:to the estate of|estate of|re:|for|by)\s+(.*?)(?:,|\n| who died| deceased)"
    ).unwrap();
    static ref CAPITALIZED_RUN: Regex =
        Regex::new(r"\b[A-Z][a-z]+(?: [A-Z][a-z]+)+\b").unwrap();
}

/// Unique normalized candidate names, kept in first-insertion order.
///
/// Only membership carries meaning; the order exists so that best-match
/// tie-breaking is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an already-normalized name. Empty names and duplicates are
    /// ignored; returns whether the set grew.
    pub fn insert(&mut self, name: String) -> bool {
        if name.is_empty() || self.seen.contains(&name) {
            return false;
        }
        self.seen.insert(name.clone());
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }
}

impl FromIterator<String> for CandidateSet {
    /// Normalizes each item before inserting it.
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = CandidateSet::new();
        for name in iter {
            set.insert(normalize(&name));
        }
        set
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

/// Which extraction passes to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractStrategies {
    pub estate_phrase: bool,
    pub capitalized: bool,
}

impl Default for ExtractStrategies {
    fn default() -> Self {
        Self {
            estate_phrase: true,
            capitalized: true,
        }
    }
}

impl ExtractStrategies {
    pub fn estate_only() -> Self {
        Self {
            estate_phrase: true,
            capitalized: false,
        }
    }

    pub fn capitalized_only() -> Self {
        Self {
            estate_phrase: false,
            capitalized: true,
        }
    }
}

/// Extract candidates with both passes enabled.
pub fn extract_candidates(text: &str) -> CandidateSet {
    extract_candidates_with(text, ExtractStrategies::default())
}

/// Extract candidates using the selected passes. Estate-phrase results are
/// inserted before capitalized-sequence results, each in text order.
pub fn extract_candidates_with(text: &str, strategies: ExtractStrategies) -> CandidateSet {
    let mut set = CandidateSet::new();

    if strategies.estate_phrase {
        for caps in ESTATE_PHRASE.captures_iter(text) {
            if let Some(span) = caps.get(1) {
                set.insert(normalize(span.as_str()));
            }
        }
    }
    let after_estate = set.len();

    if strategies.capitalized {
        for m in CAPITALIZED_RUN.find_iter(text) {
            set.insert(normalize(m.as_str()));
        }
    }

    log::debug!(
        "Extracted {} candidates ({} from estate phrases, {} more from capitalized runs)",
        set.len(),
        after_estate,
        set.len() - after_estate
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estate_phrase() {
        let text = "Application to the estate of Jane Mary Smith, who died at Nairobi";
        let set = extract_candidates_with(text, ExtractStrategies::estate_only());
        assert!(set.contains("jane mary smith"));
    }

    #[test]
    fn test_estate_phrase_all_occurrences() {
        let text = "ESTATE OF PETER KAMAU deceased\n\
                    Re: Grace Achieng Otieno\n\
                    estate of Ali Hassan Mohamed who died on 1st May";
        let set = extract_candidates_with(text, ExtractStrategies::estate_only());
        assert!(set.contains("peter kamau"));
        assert!(set.contains("grace achieng otieno"));
        assert!(set.contains("ali hassan mohamed"));
    }

    #[test]
    fn test_estate_phrase_strips_alias() {
        let text = "to the estate of John Doe alias Jon Doe, who died";
        let set = extract_candidates_with(text, ExtractStrategies::estate_only());
        assert!(set.contains("john doe"));
        assert!(!set.iter().any(|c| c.contains("alias")));
    }

    #[test]
    fn test_capitalized_fallback() {
        let text = "the late john michael doe was also known as John Michael Doe in the register";
        let set = extract_candidates_with(text, ExtractStrategies::capitalized_only());
        assert!(set.contains("john michael doe"));
    }

    #[test]
    fn test_capitalized_run_without_estate_wording() {
        // No estate wording at all, so only the capitalized pass can find the name
        let text = "The late John Michael Doe was buried at Nyeri last week";
        let set = extract_candidates(text);
        let names: Vec<&str> = set.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["john michael doe"]);
    }

    #[test]
    fn test_capitalized_requires_two_words() {
        let set =
            extract_candidates_with("Nairobi is a city", ExtractStrategies::capitalized_only());
        assert!(set.is_empty());
    }

    #[test]
    fn test_strategies_union_without_duplicates() {
        let text = "to the estate of Jane Mary Smith, who died. Jane Mary Smith left a will.";
        let set = extract_candidates(text);
        assert_eq!(set.iter().filter(|c| *c == "jane mary smith").count(), 1);
        // Estate-phrase results come first
        assert_eq!(set.iter().next().map(String::as_str), Some("jane mary smith"));
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_candidates("").is_empty());
        assert!(extract_candidates("no names here at all").is_empty());
    }

    #[test]
    fn test_candidate_set_insert() {
        let mut set = CandidateSet::new();
        assert!(set.insert("a b".to_string()));
        assert!(!set.insert("a b".to_string()));
        assert!(!set.insert(String::new()));
        assert_eq!(set.len(), 1);

        let collected: CandidateSet = vec!["Jane  Doe".to_string(), "jane doe".to_string()]
            .into_iter()
            .collect();
        assert_eq!(collected.len(), 1);
        assert!(collected.contains("jane doe"));
    }
}
