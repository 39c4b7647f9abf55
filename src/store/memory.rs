//! In-memory record store.

use std::sync::RwLock;

use crate::logging::trace;

use super::error::StoreError;
use super::traits::RecordStore;
use super::types::{check_score, NewRecord, RecordId, ScoreRecord};

#[derive(Debug)]
struct Table {
    next_id: u64,
    records: Vec<ScoreRecord>,
}

/// A [`RecordStore`] that keeps everything in memory.
///
/// Nothing survives the process. Useful for tests and for embedding the
/// submission and aggregation logic without a disk.
#[derive(Debug)]
pub struct MemoryStore {
    table: RwLock<Table>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_id: RecordId::FIRST.get(),
                records: Vec::new(),
            }),
        }
    }
}

impl RecordStore for MemoryStore {
    fn create_many(&self, records: &[NewRecord]) -> Result<Vec<ScoreRecord>, StoreError> {
        for record in records {
            check_score(record.score)?;
        }

        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        let first = table.next_id;
        let created: Vec<ScoreRecord> = records
            .iter()
            .cloned()
            .zip(first..)
            .map(|(record, id)| record.with_id(RecordId(id)))
            .collect();

        table.next_id = first + created.len() as u64;
        table.records.extend(created.iter().cloned());
        trace!(count = created.len(), first_id = first, "records created in memory");
        Ok(created)
    }

    fn read_all(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.records.clone())
    }

    fn read_by_id(&self, id: RecordId) -> Result<ScoreRecord, StoreError> {
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;
        table
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn update_score(&self, id: RecordId, score: f64) -> Result<ScoreRecord, StoreError> {
        check_score(score)?;

        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        let record = table
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))?;
        record.score = score;
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> Vec<NewRecord> {
        vec![
            NewRecord::new("Alice", 10.0, None, None),
            NewRecord::new("Bob", 7.5, None, None),
        ]
    }

    #[test]
    fn test_ids_continue_across_batches() {
        let store = MemoryStore::new();
        let first = store.create_many(&batch()).unwrap();
        let second = store.create_many(&batch()).unwrap();

        let ids: Vec<u64> = first.iter().chain(&second).map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_invalid_score_stores_nothing() {
        let store = MemoryStore::new();
        let mut records = batch();
        records.push(NewRecord::new("Carol", f64::INFINITY, None, None));

        assert!(store.create_many(&records).is_err());
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_missing_record() {
        let store = MemoryStore::new();
        store.create_many(&batch()).unwrap();

        let err = store.update_score(RecordId(99), 1.0).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_distinct_names_in_first_seen_order() {
        let store = MemoryStore::new();
        store
            .create_many(&[
                NewRecord::new("Bob", 1.0, None, None),
                NewRecord::new("Alice", 2.0, None, None),
                NewRecord::new("Bob", 3.0, None, None),
            ])
            .unwrap();

        assert_eq!(store.list_distinct_names().unwrap(), vec!["Bob", "Alice"]);
    }
}
