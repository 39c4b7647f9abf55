//! Aggregate and report handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::aggregate::{PlayerAggregation, grand_total};
use crate::report::{PlayerReport, ReportQuery, player_report};
use crate::store::RecordStore;

use super::super::{content::JsonBody, error::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct TotalResponse {
    pub total_score: f64,
}

/// Distinct player names, in order of first appearance.
pub async fn list_players(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.store().list_distinct_names()?))
}

/// Sum of every recorded score.
pub async fn total_score(State(state): State<AppState>) -> Result<Json<TotalResponse>, ApiError> {
    let records = state.store().read_all()?;
    Ok(Json(TotalResponse {
        total_score: grand_total(&records),
    }))
}

/// Per-player totals and score lists over every record.
pub async fn player_scores(
    State(state): State<AppState>,
) -> Result<Json<PlayerAggregation>, ApiError> {
    let records = state.store().read_all()?;
    Ok(Json(PlayerAggregation::from_records(&records)))
}

/// Report on a chosen set of players.
pub async fn report(
    State(state): State<AppState>,
    JsonBody(query): JsonBody<ReportQuery>,
) -> Result<Json<PlayerReport>, ApiError> {
    Ok(Json(player_report(state.store(), &query)?))
}
