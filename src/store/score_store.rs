//! Durable record store backed by fjall.

use std::path::Path;
use std::sync::Mutex;

use fjall::{Keyspace, KeyspaceCreateOptions, PersistMode};

use crate::logging::{debug, info, trace, warn};

use super::error::StoreError;
use super::format::{decode_record, encode_existing, encode_new};
use super::traits::RecordStore;
use super::types::{NewRecord, RecordId, ScoreRecord};

/// Keys in the metadata keyspace.
const META_CONFIG_KEY: &str = "config";
const META_NEXT_ID_KEY: &str = "next_id";

const META_KEYSPACE: &str = "_meta";
const RECORDS_KEYSPACE: &str = "records";

/// Current store layout version (1).
/// Increment this when changing the keyspace layout or the meta entries.
/// The store will reject opening databases with a different version.
const STORE_VERSION: u32 = 1;

/// A score record store backed by fjall.
///
/// Records live in the `records` keyspace under their big-endian id, so a
/// forward scan yields insertion order. The `_meta` keyspace holds the layout
/// version and the next id to hand out.
///
/// # Example
///
/// ```ignore
/// use scorebook::prelude::*;
///
/// let store = ScoreStore::open_or_init(".scorebook")?;
/// let created = store.create_many(&[
///     NewRecord::new("Alice", 10.0, Some("2024-01-01".into()), Some("Park".into())),
///     NewRecord::new("Bob", 7.5, Some("2024-01-01".into()), Some("Park".into())),
/// ])?;
/// store.update_score(created[0].id, 12.0)?;
/// ```
///
/// # Persistence
///
/// Every mutating call commits through a single fjall write batch and then
/// syncs the journal before returning. Writers are serialized by a store-wide
/// lock so two batches never draw the same ids.
pub struct ScoreStore {
    db: fjall::Database,
    meta: Keyspace,
    records: Keyspace,
    write_lock: Mutex<()>,
}

impl ScoreStore {
    /// Open an existing store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening score store");

        if !path.exists() {
            return Err(StoreError::NotInitialized(path.display().to_string()));
        }

        let (db, meta) = Self::open_database(path)?;
        let Some(version) = Self::stored_version(&meta)? else {
            warn!(path = %path.display(), "store not initialized - no config found");
            return Err(StoreError::NotInitialized(path.display().to_string()));
        };
        Self::finish_open(path, db, meta, version)
    }

    /// Initialize a new store at the given path.
    pub fn init(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "initializing score store");

        let (db, meta) = Self::open_database(path)?;
        Self::initialize(path, db, meta)
    }

    /// Open the store if one is initialized at the path, otherwise initialize it.
    ///
    /// A missing path and an existing directory without store metadata (for
    /// example an empty, pre-created volume) are both initialized in place.
    pub fn open_or_init(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let (db, meta) = Self::open_database(path)?;

        match Self::stored_version(&meta)? {
            Some(version) => Self::finish_open(path, db, meta, version),
            None => {
                debug!(path = %path.display(), "no store metadata found, initializing");
                Self::initialize(path, db, meta)
            }
        }
    }

    fn open_database(path: &Path) -> Result<(fjall::Database, Keyspace), StoreError> {
        let db = fjall::Database::builder(path).open()?;
        let meta = db.keyspace(META_KEYSPACE, KeyspaceCreateOptions::default)?;
        Ok((db, meta))
    }

    /// Layout version recorded in `_meta`, or `None` if the store was never initialized.
    fn stored_version(meta: &Keyspace) -> Result<Option<u32>, StoreError> {
        let Some(config) = meta.get(META_CONFIG_KEY)? else {
            return Ok(None);
        };

        let version = u32::from_le_bytes(
            config
                .as_ref()
                .try_into()
                .map_err(|_| StoreError::InvalidFormat("Invalid config format".to_string()))?,
        );
        Ok(Some(version))
    }

    fn finish_open(
        path: &Path,
        db: fjall::Database,
        meta: Keyspace,
        version: u32,
    ) -> Result<Self, StoreError> {
        if version != STORE_VERSION {
            return Err(StoreError::InvalidFormat(format!(
                "Store version mismatch: expected {}, got {}",
                STORE_VERSION, version
            )));
        }

        let records = db.keyspace(RECORDS_KEYSPACE, KeyspaceCreateOptions::default)?;

        info!(path = %path.display(), "score store opened");
        Ok(Self::from_parts(db, meta, records))
    }

    fn initialize(path: &Path, db: fjall::Database, meta: Keyspace) -> Result<Self, StoreError> {
        let records = db.keyspace(RECORDS_KEYSPACE, KeyspaceCreateOptions::default)?;

        meta.insert(META_CONFIG_KEY, STORE_VERSION.to_le_bytes())?;
        if meta.get(META_NEXT_ID_KEY)?.is_none() {
            meta.insert(META_NEXT_ID_KEY, RecordId::FIRST.get().to_le_bytes())?;
        }
        db.persist(PersistMode::SyncAll)?;

        info!(path = %path.display(), version = STORE_VERSION, "score store initialized");
        Ok(Self::from_parts(db, meta, records))
    }

    fn from_parts(db: fjall::Database, meta: Keyspace, records: Keyspace) -> Self {
        Self {
            db,
            meta,
            records,
            write_lock: Mutex::new(()),
        }
    }

    fn next_id(&self) -> Result<u64, StoreError> {
        let Some(raw) = self.meta.get(META_NEXT_ID_KEY)? else {
            return Ok(RecordId::FIRST.get());
        };
        let bytes: [u8; 8] = raw
            .as_ref()
            .try_into()
            .map_err(|_| StoreError::InvalidFormat("Invalid next id format".to_string()))?;
        Ok(u64::from_le_bytes(bytes))
    }

    fn load(&self, id: RecordId) -> Result<Option<ScoreRecord>, StoreError> {
        let Some(bytes) = self.records.get(id.to_key())? else {
            return Ok(None);
        };
        decode_record(id, &bytes).map(Some)
    }
}

impl RecordStore for ScoreStore {
    fn create_many(&self, records: &[NewRecord]) -> Result<Vec<ScoreRecord>, StoreError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        // Encode before taking the lock; a bad record aborts with nothing written.
        let encoded = records
            .iter()
            .map(encode_new)
            .collect::<Result<Vec<_>, _>>()?;

        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let first = self.next_id()?;
        let next = first + records.len() as u64;

        let mut batch = self.db.batch();
        let mut created = Vec::with_capacity(records.len());
        for ((record, bytes), id) in records.iter().zip(encoded).zip(first..) {
            let id = RecordId(id);
            batch.insert(&self.records, id.to_key(), bytes);
            created.push(record.clone().with_id(id));
        }
        batch.insert(&self.meta, META_NEXT_ID_KEY, next.to_le_bytes());
        batch.commit()?;
        self.db.persist(PersistMode::SyncAll)?;

        debug!(count = created.len(), first_id = first, "records created");
        Ok(created)
    }

    fn read_all(&self) -> Result<Vec<ScoreRecord>, StoreError> {
        let mut records = Vec::new();

        for kv in self.records.iter() {
            let key = kv.key()?;
            let id = RecordId::from_key(key.as_ref())?;
            if let Some(record) = self.load(id)? {
                records.push(record);
            }
        }

        trace!(count = records.len(), "records read");
        Ok(records)
    }

    fn read_by_id(&self, id: RecordId) -> Result<ScoreRecord, StoreError> {
        self.load(id)?.ok_or(StoreError::NotFound(id))
    }

    fn update_score(&self, id: RecordId, score: f64) -> Result<ScoreRecord, StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;

        let mut record = self.load(id)?.ok_or(StoreError::NotFound(id))?;
        record.score = score;

        let bytes = encode_existing(&record)?;
        self.records.insert(id.to_key(), bytes)?;
        self.db.persist(PersistMode::SyncAll)?;

        debug!(id = id.get(), score = score, "score updated");
        Ok(record)
    }
}
