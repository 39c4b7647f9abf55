//! The narrow interface the submission, aggregation and report layers use.

use std::collections::HashSet;

use super::error::StoreError;
use super::types::{NewRecord, RecordId, ScoreRecord};

/// A durable table of score records.
///
/// Implementations return records in id order and never delete them.
pub trait RecordStore {
    /// Persist all records atomically, returning them with their assigned ids
    /// in input order. Either every record is stored or none is.
    fn create_many(&self, records: &[NewRecord]) -> Result<Vec<ScoreRecord>, StoreError>;

    /// Every record, in id order.
    fn read_all(&self) -> Result<Vec<ScoreRecord>, StoreError>;

    /// The record with the given id, or [`StoreError::NotFound`].
    fn read_by_id(&self, id: RecordId) -> Result<ScoreRecord, StoreError>;

    /// Overwrite the score of an existing record. No other field changes.
    fn update_score(&self, id: RecordId, score: f64) -> Result<ScoreRecord, StoreError>;

    /// Records whose name is in `names`, in id order.
    fn read_by_names(&self, names: &HashSet<String>) -> Result<Vec<ScoreRecord>, StoreError> {
        let mut records = self.read_all()?;
        records.retain(|r| names.contains(&r.name));
        Ok(records)
    }

    /// Each player name once, in order of first appearance.
    fn list_distinct_names(&self) -> Result<Vec<String>, StoreError> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for record in self.read_all()? {
            if seen.insert(record.name.clone()) {
                names.push(record.name);
            }
        }
        Ok(names)
    }
}

impl<T: RecordStore + ?Sized> RecordStore for &T {
    fn create_many(&self, records: &[NewRecord]) -> Result<Vec<ScoreRecord>, StoreError> {
        (**self).create_many(records)
    }

    fn read_all(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        (**self).read_all()
    }

    fn read_by_id(&self, id: RecordId) -> Result<ScoreRecord, StoreError> {
        (**self).read_by_id(id)
    }

    fn update_score(&self, id: RecordId, score: f64) -> Result<ScoreRecord, StoreError> {
        (**self).update_score(id, score)
    }

    fn read_by_names(&self, names: &HashSet<String>) -> Result<Vec<ScoreRecord>, StoreError> {
        (**self).read_by_names(names)
    }

    fn list_distinct_names(&self) -> Result<Vec<String>, StoreError> {
        (**self).list_distinct_names()
    }
}
