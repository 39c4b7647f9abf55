//! Player reports: a filtered read plus chart-ready columns.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::aggregate::{grand_total, PlayerAggregation};
use crate::store::{RecordStore, ScoreRecord, StoreError};

/// Which players to report on.
///
/// `date` and `place` label the report; they do not filter records.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReportQuery {
    pub players: Vec<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
    /// Include per-player totals and score lists.
    #[serde(default)]
    pub per_player: bool,
}

impl ReportQuery {
    pub fn new<I, S>(players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            players: players.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }

    pub fn per_player(mut self) -> Self {
        self.per_player = true;
        self
    }
}

/// Display-only labels carried over from the query. Empty labels are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Annotations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

/// Column-oriented view of the records for plotting score against player.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub names: Vec<String>,
    pub scores: Vec<f64>,
    pub dates: Vec<Option<String>>,
    pub places: Vec<Option<String>>,
}

impl ChartSeries {
    pub fn from_records(records: &[ScoreRecord]) -> Self {
        let mut series = Self::default();
        for record in records {
            series.names.push(record.name.clone());
            series.scores.push(record.score);
            series.dates.push(record.date.clone());
            series.places.push(record.place.clone());
        }
        series
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerReport {
    pub records: Vec<ScoreRecord>,
    pub total_score: f64,
    pub annotations: Annotations,
    pub chart: ChartSeries,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<PlayerAggregation>,
}

/// Read every record of the requested players and shape it for display.
pub fn player_report<S>(store: &S, query: &ReportQuery) -> Result<PlayerReport, StoreError>
where
    S: RecordStore + ?Sized,
{
    let names: HashSet<String> = query.players.iter().cloned().collect();
    let records = store.read_by_names(&names)?;

    let aggregation = query
        .per_player
        .then(|| PlayerAggregation::from_records(&records));

    Ok(PlayerReport {
        total_score: grand_total(&records),
        annotations: Annotations {
            date: query.date.clone().filter(|d| !d.is_empty()),
            place: query.place.clone().filter(|p| !p.is_empty()),
        },
        chart: ChartSeries::from_records(&records),
        aggregation,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, NewRecord};

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .create_many(&[
                NewRecord::new("Alice", 10.0, Some("d1".into()), None),
                NewRecord::new("Bob", 7.5, Some("d1".into()), None),
                NewRecord::new("Alice", 4.0, Some("d2".into()), Some("Hall".into())),
            ])
            .unwrap();
        store
    }

    #[test]
    fn test_filters_by_name_and_keeps_order() {
        let report = player_report(&seeded(), &ReportQuery::new(["Alice"])).unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.total_score, 14.0);
        assert_eq!(report.chart.scores, vec![10.0, 4.0]);
        assert_eq!(report.chart.dates, vec![Some("d1".into()), Some("d2".into())]);
        assert_eq!(report.chart.places, vec![None, Some("Hall".into())]);
        assert!(report.aggregation.is_none());
    }

    #[test]
    fn test_annotations_do_not_filter() {
        let query = ReportQuery::new(["Alice", "Bob"])
            .with_date("d9")
            .with_place("")
            .per_player();
        let report = player_report(&seeded(), &query).unwrap();

        assert_eq!(report.records.len(), 3);
        assert_eq!(report.annotations.date.as_deref(), Some("d9"));
        assert_eq!(report.annotations.place, None);

        let agg = report.aggregation.unwrap();
        assert_eq!(agg.total("Alice"), Some(14.0));
        assert_eq!(agg.scores("Bob"), Some(&[7.5][..]));
    }

    #[test]
    fn test_unknown_players_yield_empty_report() {
        let report = player_report(&seeded(), &ReportQuery::new(["Zed"])).unwrap();
        assert!(report.records.is_empty());
        assert!(report.chart.is_empty());
        assert_eq!(report.total_score, 0.0);
    }
}
