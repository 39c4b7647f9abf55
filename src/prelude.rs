//! Convenient re-exports for common usage patterns.
//!
//! ```ignore
//! use scorebook::prelude::*;
//!
//! let store = ScoreStore::open_or_init(".scorebook")?;
//! let report = player_report(&store, &ReportQuery::new(["Alice"]).per_player())?;
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Record store
#[cfg(feature = "store")]
pub use crate::store::ScoreStore;
pub use crate::store::{MemoryStore, NewRecord, RecordId, RecordStore, ScoreRecord, StoreError};

// Submission
pub use crate::submission::{
    submit, SubmissionForm, SubmissionOutcome, SubmissionPayload, SubmitError, ValidationError,
    ValidationReason,
};

// Read side
pub use crate::aggregate::{grand_total, PlayerAggregation, PlayerScores};
pub use crate::report::{player_report, ChartSeries, PlayerReport, ReportQuery};
