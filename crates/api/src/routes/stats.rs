//! Summary Statistics Route

use axum::{extract::State, Json};
use cohort_engine::{summary_stats, SummaryStats};
use std::sync::Arc;

use crate::telemetry;
use crate::AppState;

/// Get patient/hospital counts and the operational figures
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<SummaryStats> {
    telemetry::record_request("stats");
    Json(summary_stats(&state.table, state.metrics.as_ref()))
}
