//! Enriched Records Route

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::telemetry;
use crate::AppState;

/// Get the enriched table, one object per patient with derived fields
pub async fn get_records(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    telemetry::record_request("records");

    let body = serde_json::to_vec(state.table.rows())
        .map_err(|e| ApiError::Internal(format!("serializing records: {e}")))?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
