//! Server configuration parsing.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Server configuration loaded from TOML file.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Server settings.
    pub server: ServerConfig,
    /// Score store location.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Cross-origin settings.
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Server bind settings.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1" or "0.0.0.0").
    pub bind: String,
    /// Port to listen on.
    pub port: u16,
}

/// Score store configuration.
#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the store directory. Created on first start.
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: ".scorebook".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. "info" or "scorebook=debug,tower_http=info".
    pub level: String,
    pub format: LogFormat,
    /// "stdout", "stderr", or a file path to append to.
    pub output: String,
    /// ANSI colors (terminal output only).
    pub color: bool,
    pub timestamps: bool,
    /// Include the event target (module path).
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            output: "stderr".to_string(),
            color: true,
            timestamps: true,
            target: true,
        }
    }
}

/// CORS configuration. Disabled by default.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    /// Allowed origins; "*" allows any.
    pub allow_origins: Vec<String>,
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
    pub allow_credentials: bool,
    /// Preflight cache duration in seconds.
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allow_origins: Vec::new(),
            allow_methods: ["GET", "POST", "PUT"].map(String::from).to_vec(),
            allow_headers: vec!["content-type".to_string()],
            allow_credentials: false,
            max_age: 3600,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Get the socket address string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    Io(String, #[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
bind = "0.0.0.0"
port = 8080

[database]
path = "/var/lib/scorebook"

[logging]
level = "scorebook=debug"
format = "json"
output = "stdout"

[cors]
enabled = true
allow_origins = ["https://scores.example"]
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.database.path, "/var/lib/scorebook");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.output, "stdout");
        assert!(config.logging.timestamps);
        assert!(config.cors.enabled);
        assert_eq!(config.cors.allow_methods, vec!["GET", "POST", "PUT"]);
    }

    #[test]
    fn test_only_server_table_is_required() {
        let config = Config::parse("[server]\nbind = \"127.0.0.1\"\nport = 3000\n").unwrap();
        assert_eq!(config.database.path, ".scorebook");
        assert_eq!(config.logging.level, "info");
        assert!(!config.cors.enabled);

        assert!(matches!(Config::parse("[database]\npath = \"x\"\n"), Err(ConfigError::Parse(_))));
    }
}
