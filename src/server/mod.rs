//! HTTP API server for scorebook.
//!
//! This module provides a JSON API on top of the scorebook library using
//! axum: batch submissions (JSON or urlencoded form), record listing and
//! score edits, totals, per-player aggregates and player reports.

mod config;
mod content;
mod error;
mod logging;
mod routes;
mod state;

pub use config::{Config, ConfigError, CorsConfig, DatabaseConfig, LogFormat, LoggingConfig, ServerConfig};
pub use content::{JsonBody, SubmissionBody};
pub use error::ApiError;
pub use logging::{LoggingError, init as init_logging};
pub use routes::router;
pub use state::{AppState, StateError};
