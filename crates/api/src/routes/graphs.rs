//! Whole-Dataset Distribution Route

use axum::{extract::State, Json};
use distribution::{overview, Overview};
use std::sync::Arc;

use crate::error::ApiError;
use crate::telemetry;
use crate::AppState;

/// Get a distribution for every categorical and continuous attribute
pub async fn get_graphs(State(state): State<Arc<AppState>>) -> Result<Json<Overview>, ApiError> {
    telemetry::record_request("graphs");

    let table = Arc::clone(&state.table);
    let result = tokio::task::spawn_blocking(move || overview(&table))
        .await
        .map_err(|e| ApiError::Internal(format!("overview task failed: {e}")))?;

    Ok(Json(result))
}
