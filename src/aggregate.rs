//! Read-side aggregation over score records.
//!
//! Both computations are pure: they take whatever record sequence the caller
//! read (all records or a filtered subset) and never fail.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

use crate::store::ScoreRecord;

/// Sum of `score` across the records; zero for an empty sequence.
pub fn grand_total<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a ScoreRecord>,
{
    records.into_iter().fold(0.0, |total, r| total + r.score)
}

/// A single player's running total and individual scores.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerScores {
    pub name: String,
    pub total: f64,
    pub scores: Vec<f64>,
}

/// Per-player totals and score lists.
///
/// Players appear in the order their name was first seen in the input, and
/// each player's scores keep the input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerAggregation {
    index: HashMap<String, usize>,
    players: Vec<PlayerScores>,
}

impl PlayerAggregation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate a record sequence in a single pass.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ScoreRecord>,
    {
        let mut aggregation = Self::new();
        for record in records {
            aggregation.add(&record.name, record.score);
        }
        aggregation
    }

    /// Fold one score into the aggregation.
    pub fn add(&mut self, name: &str, score: f64) {
        if let Some(player) = self
            .index
            .get(name)
            .and_then(|&slot| self.players.get_mut(slot))
        {
            player.total += score;
            player.scores.push(score);
            return;
        }

        self.index.insert(name.to_string(), self.players.len());
        self.players.push(PlayerScores {
            name: name.to_string(),
            total: score,
            scores: vec![score],
        });
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&PlayerScores> {
        self.index.get(name).and_then(|&slot| self.players.get(slot))
    }

    pub fn total(&self, name: &str) -> Option<f64> {
        self.get(name).map(|p| p.total)
    }

    pub fn scores(&self, name: &str) -> Option<&[f64]> {
        self.get(name).map(|p| p.scores.as_slice())
    }

    /// Players in first-occurrence order.
    pub fn players(&self) -> &[PlayerScores] {
        &self.players
    }

    /// `(name, total)` pairs in first-occurrence order.
    pub fn totals(&self) -> impl Iterator<Item = (&str, f64)> {
        self.players.iter().map(|p| (p.name.as_str(), p.total))
    }

    /// `(name, scores)` pairs in first-occurrence order.
    pub fn individual(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.players
            .iter()
            .map(|p| (p.name.as_str(), p.scores.as_slice()))
    }
}

struct TotalsMap<'a>(&'a [PlayerScores]);

impl Serialize for TotalsMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for player in self.0 {
            map.serialize_entry(&player.name, &player.total)?;
        }
        map.end()
    }
}

struct IndividualMap<'a>(&'a [PlayerScores]);

impl Serialize for IndividualMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for player in self.0 {
            map.serialize_entry(&player.name, &player.scores)?;
        }
        map.end()
    }
}

/// Serializes as `{"totals": {name: total}, "individual": {name: [scores]}}`
/// with map keys in first-occurrence order.
impl Serialize for PlayerAggregation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PlayerAggregation", 2)?;
        state.serialize_field("totals", &TotalsMap(&self.players))?;
        state.serialize_field("individual", &IndividualMap(&self.players))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{NewRecord, RecordId};

    fn records(entries: &[(&str, f64)]) -> Vec<ScoreRecord> {
        entries
            .iter()
            .zip(1..)
            .map(|(&(name, score), id)| NewRecord::new(name, score, None, None).with_id(RecordId(id)))
            .collect()
    }

    #[test]
    fn test_grand_total() {
        assert_eq!(grand_total(&records(&[("Alice", 10.0), ("Bob", 7.5)])), 17.5);
        assert_eq!(grand_total(&Vec::<ScoreRecord>::new()), 0.0);
    }

    #[test]
    fn test_empty_total_is_positive_zero() {
        let total = grand_total(&Vec::<ScoreRecord>::new());
        assert!(total.is_sign_positive());
        assert_eq!(total.to_string(), "0");
        assert_eq!(serde_json::to_string(&total).unwrap(), "0.0");
    }

    #[test]
    fn test_groups_by_name_in_first_occurrence_order() {
        let input = records(&[("Bob", 1.0), ("Alice", 2.0), ("Bob", 3.5), ("Carol", -1.0)]);
        let agg = PlayerAggregation::from_records(&input);

        let names: Vec<&str> = agg.totals().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Bob", "Alice", "Carol"]);
        assert_eq!(agg.total("Bob"), Some(4.5));
        assert_eq!(agg.scores("Bob"), Some(&[1.0, 3.5][..]));
        assert_eq!(agg.total("Dave"), None);
    }

    #[test]
    fn test_empty_input() {
        let agg = PlayerAggregation::from_records(std::iter::empty::<&ScoreRecord>());
        assert!(agg.is_empty());
        assert_eq!(agg.totals().count(), 0);
    }

    #[test]
    fn test_serializes_maps_in_first_occurrence_order() {
        let input = records(&[("Zed", 2.0), ("Alice", 1.0), ("Zed", 3.0)]);
        let json = serde_json::to_string(&PlayerAggregation::from_records(&input)).unwrap();

        assert_eq!(
            json,
            r#"{"totals":{"Zed":5.0,"Alice":1.0},"individual":{"Zed":[2.0,3.0],"Alice":[1.0]}}"#
        );
    }
}
