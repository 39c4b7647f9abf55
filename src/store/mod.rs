//! Record store module for score records.
//!
//! This module defines the [`RecordStore`] interface and its two
//! implementations: a durable [`ScoreStore`] backed by fjall (requires the
//! `store` feature) and a [`MemoryStore`] for tests and embedding.

mod error;
#[cfg(feature = "store")]
mod format;
mod memory;
#[cfg(feature = "store")]
mod score_store;
mod traits;
mod types;

pub use error::StoreError;
pub use memory::MemoryStore;
#[cfg(feature = "store")]
pub use score_store::ScoreStore;
pub use traits::RecordStore;
pub use types::{NewRecord, RecordId, ScoreRecord};
