//! Common test utilities and fixtures.

#![cfg(feature = "server")]
#![allow(dead_code)]

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use tempfile::TempDir;
use scorebook::server::{AppState, Config, CorsConfig, DatabaseConfig, LoggingConfig, ServerConfig, router};

pub const DATE: &str = "2024-01-01";
pub const PLACE: &str = "Park";

/// Test application wrapper that manages a temporary store.
pub struct TestApp {
    pub server: TestServer,
    _temp_dir: TempDir, // Keep alive for test duration
}

impl TestApp {
    /// Create a new test application with a fresh temporary store.
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let db_path = temp_dir.path().join("db");
        let config = Config {
            server: ServerConfig {
                bind: "127.0.0.1".into(),
                port: 0,
            },
            database: DatabaseConfig {
                path: db_path.to_string_lossy().into(),
            },
            logging: LoggingConfig::default(),
            cors: CorsConfig::default(),
        };
        let state = AppState::from_config(&config)?;
        let server = TestServer::new(router(state))?;
        Ok(Self {
            server,
            _temp_dir: temp_dir,
        })
    }

    /// Submit players as a JSON body, expecting success. Returns the response body.
    pub async fn submit(&self, players: &[(&str, &str)]) -> anyhow::Result<Value> {
        let entries: Vec<Value> = players
            .iter()
            .map(|(name, number)| json!({ "name": name, "number": number }))
            .collect();

        let response = self
            .server
            .post("/api/v1/submissions")
            .json(&json!({ "date": DATE, "place": PLACE, "players": entries }))
            .await;
        response.assert_status(StatusCode::CREATED);
        Ok(response.json())
    }

    /// All records currently stored.
    pub async fn records(&self) -> Vec<Value> {
        let response = self.server.get("/api/v1/records").await;
        response.assert_status_ok();
        response.json()
    }

    /// Grand total over every record.
    pub async fn total(&self) -> Option<f64> {
        let response = self.server.get("/api/v1/scores/total").await;
        response.assert_status_ok();
        let body: Value = response.json();
        body["total_score"].as_f64()
    }
}

/// Assert an error response carries the expected code.
pub fn assert_error_code(body: &Value, code: &str) {
    assert_eq!(body["error"]["code"].as_str(), Some(code), "body: {body}");
}
