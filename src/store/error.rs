//! Error types for the record store module.

use thiserror::Error;

use super::types::RecordId;

/// Errors that can occur during record store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[cfg(feature = "store")]
    #[error("Fjall error: {0}")]
    Fjall(#[from] fjall::Error),

    #[error("Record not found: {0}")]
    NotFound(RecordId),

    #[error("Score is not a finite number: {0}")]
    InvalidScore(f64),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Store not initialized at {0}")]
    NotInitialized(String),

    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Returns `true` if a referenced record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
