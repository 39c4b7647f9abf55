//! Record listing and score edit handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::store::{RecordId, RecordStore, ScoreRecord};

use super::super::{content::JsonBody, error::ApiError, state::AppState};

/// Body of a score edit.
#[derive(Debug, Deserialize)]
pub struct ScoreUpdate {
    pub score: f64,
}

/// List every record in id order.
pub async fn list_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScoreRecord>>, ApiError> {
    Ok(Json(state.store().read_all()?))
}

/// Get a single record.
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ScoreRecord>, ApiError> {
    Ok(Json(state.store().read_by_id(RecordId(id))?))
}

/// Overwrite the score of a record.
pub async fn update_score(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    JsonBody(update): JsonBody<ScoreUpdate>,
) -> Result<Json<ScoreRecord>, ApiError> {
    let record = state.store().update_score(RecordId(id), update.score)?;
    tracing::info!(id = id, score = record.score, "score edited");
    Ok(Json(record))
}
