//! Prometheus Scrape Route

use axum::extract::State;
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;

/// Render metrics in the Prometheus text format
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Result<String, ApiError> {
    state
        .prometheus
        .as_ref()
        .map(|handle| handle.render())
        .ok_or_else(|| ApiError::NotFound("metrics recorder not installed".to_string()))
}
