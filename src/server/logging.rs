//! Logging initialization from the `[logging]` config table.

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use super::config::{LogFormat, LoggingConfig};

/// Install the global tracing subscriber described by `config`.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LoggingError::InvalidFilter(e.to_string()))?;

    let (writer, ansi) = match config.output.as_str() {
        "stdout" => (
            BoxMakeWriter::new(io::stdout),
            config.color && io::stdout().is_terminal(),
        ),
        "stderr" => (
            BoxMakeWriter::new(io::stderr),
            config.color && io::stderr().is_terminal(),
        ),
        path => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LoggingError::FileOpen(path.to_string(), e))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
    };

    let layer = fmt::layer()
        .with_target(config.target)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match (config.format, config.timestamps) {
        (LogFormat::Text, true) => registry.with(layer.with_ansi(ansi)).try_init(),
        (LogFormat::Text, false) => registry.with(layer.with_ansi(ansi).without_time()).try_init(),
        (LogFormat::Json, true) => registry.with(layer.json()).try_init(),
        (LogFormat::Json, false) => registry.with(layer.json().without_time()).try_init(),
    };

    installed.map_err(|e| LoggingError::Install(e.to_string()))
}

/// Errors that can occur during logging initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Failed to open log file '{0}': {1}")]
    FileOpen(String, #[source] io::Error),

    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}
