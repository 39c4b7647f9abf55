//! Application state management.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::store::{ScoreStore, StoreError};

use super::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    store: Arc<ScoreStore>,
}

impl AppState {
    /// Wrap an already opened store.
    pub fn new(store: ScoreStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Open (or create) the store named in the configuration.
    pub fn from_config(config: &Config) -> Result<Self, StateError> {
        let path = Path::new(&config.database.path);
        let store = ScoreStore::open_or_init(path).map_err(|source| StateError::OpenStore {
            path: config.database.path.clone(),
            source,
        })?;
        Ok(Self::new(store))
    }

    pub fn store(&self) -> &ScoreStore {
        &self.store
    }
}

/// Errors that can occur when setting up application state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to open score store at '{path}': {source}")]
    OpenStore {
        path: String,
        #[source]
        source: StoreError,
    },
}
