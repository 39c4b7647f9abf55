//! Content-type negotiation for submission bodies.

use std::collections::HashMap;

use axum::{
    Form, Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use crate::submission::{SubmissionForm, SubmissionPayload};

use super::error::ApiError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// A JSON body whose rejections render as [`ApiError`].
///
/// A request without a Content-Type header is still read as JSON.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.headers().contains_key(CONTENT_TYPE) {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))?;
        Ok(Self(value))
    }
}

/// A submission decoded from either a urlencoded form or a JSON body.
///
/// Forms use the flat field layout (`num_players`, `date`, `place`,
/// `name{i}`, `number{i}`); JSON bodies use [`SubmissionPayload`].
#[derive(Debug)]
pub struct SubmissionBody(pub SubmissionForm);

impl<S> FromRequest<S> for SubmissionBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let Some(content_type) = content_type else {
            let JsonBody(payload) = JsonBody::<SubmissionPayload>::from_request(req, state).await?;
            return Ok(Self(payload.into()));
        };

        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match mime.as_str() {
            FORM_CONTENT_TYPE => {
                let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                let form = SubmissionForm::from_fields(fields)
                    .map_err(|e| ApiError::invalid_form(&e))?;
                Ok(Self(form))
            }
            JSON_CONTENT_TYPE => {
                let JsonBody(payload) =
                    JsonBody::<SubmissionPayload>::from_request(req, state).await?;
                Ok(Self(payload.into()))
            }
            _ => Err(ApiError::unsupported_media_type(&content_type)),
        }
    }
}
