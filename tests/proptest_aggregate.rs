//! Property-based tests for batch submission and aggregation.
//!
//! These run against the in-memory store, so they need no feature flags.

use proptest::prelude::*;
use scorebook::{
    grand_total, submit, MemoryStore, NewRecord, PlayerAggregation, RecordId, RecordStore,
    ScoreRecord, SubmissionForm, SubmitError, ValidationReason,
};
use scorebook::submission::{name_field, number_field};

/// A small name pool so generated records repeat players.
fn name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Alice", "Bob", "Carol", "Dave", "Eve"]).prop_map(String::from)
}

/// Scores with a fractional part that add exactly in binary (quarters).
fn score() -> impl Strategy<Value = f64> {
    (-4000i32..4000).prop_map(|q| f64::from(q) / 4.0)
}

fn records(entries: &[(String, f64)]) -> Vec<ScoreRecord> {
    entries
        .iter()
        .cloned()
        .zip(1u64..)
        .map(|((name, score), id)| NewRecord::new(name, score, None, None).with_id(RecordId(id)))
        .collect()
}

fn build_form(entries: &[(String, f64)]) -> SubmissionForm {
    entries.iter().enumerate().fold(
        SubmissionForm::new(entries.len(), Some("2024-01-01".into()), Some("Park".into())),
        |form, (index, (name, score))| form.with_player(index, name.clone(), score.to_string()),
    )
}

/// Ways to break a single player entry.
#[derive(Debug, Clone, Copy)]
enum Breakage {
    BlankName,
    MissingName,
    MissingScore,
    GarbageScore,
}

fn breakage() -> impl Strategy<Value = Breakage> {
    prop_oneof![
        Just(Breakage::BlankName),
        Just(Breakage::MissingName),
        Just(Breakage::MissingScore),
        Just(Breakage::GarbageScore),
    ]
}

proptest! {
    #[test]
    fn grand_total_is_arithmetic_sum(entries in prop::collection::vec((name(), score()), 0..40)) {
        let input = records(&entries);
        let expected: f64 = entries.iter().map(|(_, s)| *s).sum();
        prop_assert_eq!(grand_total(&input), expected);
    }

    #[test]
    fn per_player_lists_sum_to_totals(entries in prop::collection::vec((name(), score()), 0..40)) {
        let input = records(&entries);
        let agg = PlayerAggregation::from_records(&input);

        for (name, total) in agg.totals() {
            let scores = agg.scores(name).unwrap_or_default();
            prop_assert_eq!(scores.iter().sum::<f64>(), total);
        }

        let count: usize = agg.individual().map(|(_, s)| s.len()).sum();
        prop_assert_eq!(count, input.len());
    }

    #[test]
    fn key_order_is_first_occurrence(entries in prop::collection::vec((name(), score()), 0..40)) {
        let agg = PlayerAggregation::from_records(&records(&entries));

        let mut expected: Vec<&str> = Vec::new();
        for (name, _) in &entries {
            if !expected.contains(&name.as_str()) {
                expected.push(name);
            }
        }

        let actual: Vec<&str> = agg.totals().map(|(name, _)| name).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn valid_batch_is_stored_in_order(entries in prop::collection::vec((name(), score()), 1..20)) {
        let store = MemoryStore::new();
        let outcome = submit(&store, &build_form(&entries)).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let stored = store.read_all().map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(stored.len(), entries.len());
        prop_assert_eq!(&stored, &outcome.records);

        for (record, (name, score)) in stored.iter().zip(&entries) {
            prop_assert_eq!(&record.name, name);
            prop_assert_eq!(record.score, *score);
            prop_assert_eq!(record.date.as_deref(), Some("2024-01-01"));
            prop_assert_eq!(record.place.as_deref(), Some("Park"));
        }

        let expected: f64 = entries.iter().map(|(_, s)| *s).sum();
        prop_assert_eq!(outcome.total_score, expected);
    }

    #[test]
    fn invalid_batch_stores_nothing_and_names_first_bad_player(
        entries in prop::collection::vec((name(), score()), 1..20),
        first_bad in any::<prop::sample::Index>(),
        later_bad in any::<prop::sample::Index>(),
        kind in breakage(),
    ) {
        let first = first_bad.index(entries.len());
        let later = first + later_bad.index(entries.len() - first);

        let form = match kind {
            Breakage::BlankName => build_form(&entries)
                .with_field(name_field(later), "")
                .with_field(name_field(first), ""),
            Breakage::GarbageScore => build_form(&entries)
                .with_field(number_field(later), "12abc")
                .with_field(number_field(first), "12abc"),
            Breakage::MissingName => rebuild_without(&entries, name_field(first)),
            Breakage::MissingScore => rebuild_without(&entries, number_field(first)),
        };

        let store = MemoryStore::new();
        let err = match submit(&store, &form) {
            Err(SubmitError::Validation(err)) => err,
            other => {
                return Err(TestCaseError::fail(format!("expected validation error, got {:?}", other)));
            }
        };

        let expected_reason = match kind {
            Breakage::BlankName | Breakage::MissingName => ValidationReason::NameRequired,
            Breakage::MissingScore => ValidationReason::ScoreRequired,
            Breakage::GarbageScore => ValidationReason::InvalidNumber,
        };
        prop_assert_eq!(err.player, first + 1);
        prop_assert_eq!(err.reason, expected_reason);
        prop_assert!(store.read_all().map_err(|e| TestCaseError::fail(e.to_string()))?.is_empty());
    }
}

/// Build the form for `entries` leaving out a single field.
fn rebuild_without(entries: &[(String, f64)], skipped: String) -> SubmissionForm {
    let mut form = SubmissionForm::new(entries.len(), Some("2024-01-01".into()), Some("Park".into()));
    for (index, (name, score)) in entries.iter().enumerate() {
        if name_field(index) != skipped {
            form = form.with_field(name_field(index), name.clone());
        }
        if number_field(index) != skipped {
            form = form.with_field(number_field(index), score.to_string());
        }
    }
    form
}
