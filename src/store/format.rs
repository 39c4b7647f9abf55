//! On-disk encoding of score records.
//!
//! A stored value is laid out as:
//!
//! ```text
//! +---------+----------------+--------------------------+
//! | version | crc32 (u32 LE) | JSON {name,score,date,place} |
//! +---------+----------------+--------------------------+
//! ```
//!
//! The id lives in the key, not the value.

use serde::{Deserialize, Serialize};

use super::error::StoreError;
use super::types::{check_score, NewRecord, RecordId, ScoreRecord};

/// Current value format version.
pub(crate) const FORMAT_VERSION: u8 = 1;

const HEADER_LEN: usize = 5;

#[derive(Serialize)]
struct PayloadRef<'a> {
    name: &'a str,
    score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    place: Option<&'a str>,
}

#[derive(Deserialize)]
struct Payload {
    name: String,
    score: f64,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    place: Option<String>,
}

/// Encode the record fields (everything but the id) into a stored value.
pub(crate) fn encode_record(
    name: &str,
    score: f64,
    date: Option<&str>,
    place: Option<&str>,
) -> Result<Vec<u8>, StoreError> {
    check_score(score)?;

    let payload = serde_json::to_vec(&PayloadRef {
        name,
        score,
        date,
        place,
    })
    .map_err(|e| StoreError::InvalidFormat(e.to_string()))?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.push(FORMAT_VERSION);
    bytes.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

pub(crate) fn encode_new(record: &NewRecord) -> Result<Vec<u8>, StoreError> {
    encode_record(
        &record.name,
        record.score,
        record.date.as_deref(),
        record.place.as_deref(),
    )
}

pub(crate) fn encode_existing(record: &ScoreRecord) -> Result<Vec<u8>, StoreError> {
    encode_record(
        &record.name,
        record.score,
        record.date.as_deref(),
        record.place.as_deref(),
    )
}

/// Decode a stored value read under `id`.
pub(crate) fn decode_record(id: RecordId, bytes: &[u8]) -> Result<ScoreRecord, StoreError> {
    let (&version, rest) = bytes
        .split_first()
        .ok_or_else(|| StoreError::InvalidFormat(format!("record {} is empty", id)))?;

    if version != FORMAT_VERSION {
        return Err(StoreError::InvalidFormat(format!(
            "record {}: unsupported format version {}",
            id, version
        )));
    }

    let (checksum, payload) = rest
        .split_at_checked(HEADER_LEN - 1)
        .ok_or_else(|| StoreError::InvalidFormat(format!("record {} is truncated", id)))?;

    let expected = u32::from_le_bytes(
        checksum
            .try_into()
            .map_err(|_| StoreError::InvalidFormat(format!("record {} is truncated", id)))?,
    );
    let actual = crc32fast::hash(payload);
    if expected != actual {
        return Err(StoreError::InvalidFormat(format!(
            "record {}: checksum mismatch (stored {:08x}, computed {:08x})",
            id, expected, actual
        )));
    }

    let payload: Payload = serde_json::from_slice(payload)
        .map_err(|e| StoreError::InvalidFormat(format!("record {}: {}", id, e)))?;

    Ok(ScoreRecord {
        id,
        name: payload.name,
        score: payload.score,
        date: payload.date,
        place: payload.place,
    })
}
