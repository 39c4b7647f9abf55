//! Data types for the record store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::StoreError;

/// Identifier assigned to a record by the store.
///
/// Ids start at 1 and grow by one per created record, so id order is
/// insertion order. An id is never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    /// The first id handed out by an empty store.
    pub const FIRST: Self = Self(1);

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Big-endian key bytes; lexicographic key order equals numeric id order.
    pub fn to_key(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Parse big-endian key bytes back into an id.
    pub fn from_key(bytes: &[u8]) -> Result<Self, StoreError> {
        let raw: [u8; 8] = bytes.try_into().map_err(|_| {
            StoreError::InvalidFormat(format!("record key has {} bytes, expected 8", bytes.len()))
        })?;
        Ok(Self(u64::from_be_bytes(raw)))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RecordId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// One player's score for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: RecordId,
    pub name: String,
    pub score: f64,
    pub date: Option<String>,
    pub place: Option<String>,
}

impl ScoreRecord {
    /// Event date label, empty when absent.
    pub fn date_label(&self) -> &str {
        self.date.as_deref().unwrap_or("")
    }

    /// Event place label, empty when absent.
    pub fn place_label(&self) -> &str {
        self.place.as_deref().unwrap_or("")
    }
}

/// A record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    pub name: String,
    pub score: f64,
    pub date: Option<String>,
    pub place: Option<String>,
}

impl NewRecord {
    pub fn new(
        name: impl Into<String>,
        score: f64,
        date: Option<String>,
        place: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            score,
            date,
            place,
        }
    }

    /// Attach the id the store assigned.
    pub fn with_id(self, id: RecordId) -> ScoreRecord {
        ScoreRecord {
            id,
            name: self.name,
            score: self.score,
            date: self.date,
            place: self.place,
        }
    }
}

/// Reject scores that cannot be stored and read back (NaN, infinities).
pub(crate) fn check_score(score: f64) -> Result<(), StoreError> {
    if score.is_finite() {
        Ok(())
    } else {
        Err(StoreError::InvalidScore(score))
    }
}
