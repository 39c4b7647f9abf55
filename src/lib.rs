//! Score book library: per-player event scores with batch submission and
//! aggregation.
//!
//! Players' scores are recorded per event (a free-text date and place). A
//! multi-player submission is validated up front and stored as one atomic
//! batch; the read side sums scores overall, per player, or for a chosen set
//! of players.
//!
//! # Quick Start
//!
//! ```ignore
//! use scorebook::prelude::*;
//!
//! let store = ScoreStore::open_or_init(".scorebook")?;
//!
//! let form = SubmissionForm::new(2, Some("2024-01-01".into()), Some("Park".into()))
//!     .with_player(0, "Alice", "10")
//!     .with_player(1, "Bob", "7.5");
//! let outcome = submit(&store, &form)?;
//! assert_eq!(outcome.total_score, 17.5);
//!
//! let per_player = PlayerAggregation::from_records(&store.read_all()?);
//! ```
//!
//! # Modules
//!
//! - [`store`] - Record store interface, fjall-backed and in-memory stores
//! - [`submission`] - Multi-player form validation and batch submission
//! - [`aggregate`] - Grand total and per-player aggregation
//! - [`report`] - Filtered player reports with chart-ready columns
//! - [`server`] - HTTP API (requires `server` feature)
//!
//! # Feature Flags
//!
//! - `store` - Enable the fjall-backed store (enabled by default)
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the command-line interface binary
//! - `server` - Enable the HTTP API server
//! - `full` - Enable all features

mod logging;

pub mod aggregate;
pub mod prelude;
pub mod report;
#[cfg(feature = "server")]
pub mod server;
pub mod store;
pub mod submission;

mod error;

pub use error::{Error, Result};

pub use aggregate::{grand_total, PlayerAggregation, PlayerScores};
pub use report::{player_report, ChartSeries, PlayerReport, ReportQuery};
#[cfg(feature = "store")]
pub use store::ScoreStore;
pub use store::{MemoryStore, NewRecord, RecordId, RecordStore, ScoreRecord, StoreError};
pub use submission::{
    submit, SubmissionForm, SubmissionOutcome, SubmitError, ValidationError, ValidationReason,
};
