//! End-to-end checks of the extraction and reconciliation pipeline
//!
//! Uses a small gazette excerpt in the stereotyped notice wording plus a few
//! names that only appear outside it, and runs the public library API the
//! same way the CLI does.

use chrono::NaiveDate;
use gazette_reconcile::config::{MatchMode, ReconcileConfig, Threshold};
use gazette_reconcile::extract::extract_candidates;
use gazette_reconcile::normalize::{normalize, normalize_field};
use gazette_reconcile::reconcile::reconcile;
use gazette_reconcile::record::InputRecord;
use gazette_reconcile::score::score;
use gazette_reconcile::CandidateSet;

const GAZETTE: &str = "THE KENYA GAZETTE\n\
Published by Authority of the Republic of Kenya\n\
Nairobi, 6th June, 2025\n\
GAZETTE NOTICE NO. 7001\n\
IN THE HIGH COURT OF KENYA AT NAIROBI\n\
SUCCESSION CAUSE NO. E1021 OF 2025\n\
Application to the estate of Jane Mary Smith, who died at Nairobi on 2nd January, 2025.\n\
SUCCESSION CAUSE NO. E1022 OF 2025\n\
Application to the estate of Peter Kamau alias Peter Njoroge Kamau, who died at Thika.\n\
Witness statements from John Michael Doe were also lodged.\n";

fn rec(name: &str, cause: &str) -> InputRecord {
    InputRecord::from_pairs([("Cause No", cause), ("Name of The Deceased", name)])
}

#[test]
fn test_normalize_properties() {
    assert_eq!(normalize("John Doe alias Jon Doe"), "john doe");
    assert_eq!(normalize_field(None), "");
    for s in ["  Mixed   CASE name ", "x alias y", GAZETTE] {
        let once = normalize(s);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn test_score_properties() {
    assert_eq!(score("jane mary smith", "jane mary smith"), 100);
    assert_eq!(score("peter kamau", "peter kamua"), score("peter kamua", "peter kamau"));
}

#[test]
fn test_extracts_both_strategies() {
    let candidates = extract_candidates(GAZETTE);
    assert!(candidates.contains("jane mary smith"));
    assert!(candidates.contains("peter kamau"));
    assert!(candidates.contains("john michael doe"));
}

#[test]
fn test_filter_mode_exact_threshold() {
    let candidates = extract_candidates(GAZETTE);
    let records = vec![rec("JANE MARY SMITH", "E1021"), rec("Wanjiru Muthoni Njeri", "E9999")];

    let out = reconcile(&records, &candidates, &ReconcileConfig::default()).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].score, 100);
    assert_eq!(out[0].record.get("Cause No"), Some("E1021"));
}

#[test]
fn test_annotate_all_keeps_order() {
    let candidates = extract_candidates(GAZETTE);
    let records = vec![
        rec("Wanjiru Muthoni Njeri", "A"),
        rec("Peter Kamau alias P. N. Kamau", "B"),
        rec("", "C"),
        rec("Jane Mary Smyth", "D"),
    ];
    let config = ReconcileConfig::default()
        .with_mode(MatchMode::AnnotateAll)
        .with_approval_date(NaiveDate::from_ymd_opt(2025, 6, 5).unwrap());

    let out = reconcile(&records, &candidates, &config).unwrap();
    let causes: Vec<_> = out.iter().map(|r| r.record.get("Cause No").unwrap()).collect();
    assert_eq!(causes, vec!["A", "B", "C", "D"]);

    assert!(out[1].is_approved());
    assert_eq!(out[1].approval.as_ref().unwrap().date, "05/06/2025");
    assert!(!out[3].is_approved());
    assert_eq!(out[3].gazette_match, "jane mary smith");
    assert_eq!(out[2].score, 0);
}

#[test]
fn test_empty_candidate_set() {
    let records = vec![rec("Jane Mary Smith", "A"), rec("Peter Kamau", "B")];
    let config = ReconcileConfig::annotate_all();
    let out = reconcile(&records, &CandidateSet::new(), &config).unwrap();
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|r| r.score == 0 && r.gazette_match.is_empty()));

    // Filter mode at threshold 0 still emits the zero-score rows
    let zero = ReconcileConfig::default().with_threshold(Threshold::new(0).unwrap());
    assert_eq!(reconcile(&records, &CandidateSet::new(), &zero).unwrap().len(), 2);
}

#[test]
fn test_empty_input_records() {
    let candidates = extract_candidates(GAZETTE);
    let out = reconcile(&[], &candidates, &ReconcileConfig::default()).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_inputs_not_mutated() {
    let candidates = extract_candidates(GAZETTE);
    let before = candidates.clone();
    let records = vec![rec("Jane Mary Smith", "A")];
    let records_before = records.clone();

    reconcile(&records, &candidates, &ReconcileConfig::annotate_all()).unwrap();
    assert_eq!(candidates, before);
    assert_eq!(records, records_before);
}
