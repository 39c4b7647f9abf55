//! Unified error type for the scorebook library.
//!
//! Each module has its own error enum; [`Error`] wraps them so application
//! code can use a single type with `?`.

use thiserror::Error;

use crate::store::StoreError;
use crate::submission::{FormError, SubmitError, ValidationError};

/// Unified error type for all scorebook operations.
///
/// # Example
///
/// ```ignore
/// use scorebook::{RecordId, RecordStore, Result, ScoreStore};
///
/// fn bump(path: &str, id: u64) -> Result<()> {
///     let store = ScoreStore::open(path)?;
///     let record = store.read_by_id(RecordId(id))?;
///     store.update_score(record.id, record.score + 1.0)?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A player entry failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The submission form has no usable player count.
    #[error(transparent)]
    Form(#[from] FormError),

    /// Error from the record store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<SubmitError> for Error {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Form(e) => Self::Form(e),
            SubmitError::Validation(e) => Self::Validation(e),
            SubmitError::Store(e) => Self::Store(e),
        }
    }
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if the caller should fix its input and retry.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Form(_))
    }

    /// Returns `true` if a referenced record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_not_found())
    }

    /// Returns `true` if this is a storage failure.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Store(e) if !e.is_not_found())
    }
}
