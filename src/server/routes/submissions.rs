//! Batch submission handler.

use axum::{Json, extract::State, http::StatusCode};

use crate::submission::{SubmissionOutcome, submit};

use super::super::{content::SubmissionBody, error::ApiError, state::AppState};

/// Validate and store a multi-player submission.
pub async fn create_submission(
    State(state): State<AppState>,
    SubmissionBody(form): SubmissionBody,
) -> Result<(StatusCode, Json<SubmissionOutcome>), ApiError> {
    let outcome = submit(state.store(), &form)?;
    Ok((StatusCode::CREATED, Json(outcome)))
}
