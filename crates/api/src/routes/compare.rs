//! Cohort Comparison Route

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use cohort_engine::{compare, CompareError, Comparison};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::telemetry;
use crate::AppState;

/// Query parameters for the comparison endpoint
///
/// Both lists are passed as repeated keys:
/// `?chosen_hospitals=A&chosen_hospitals=B&attributes_to_be_compared=Sex`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareQuery {
    pub chosen_hospitals: Vec<String>,
    pub attributes_to_be_compared: Vec<String>,
}

impl CompareQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.trim_end_matches("[]") {
                "chosen_hospitals" => query.chosen_hospitals.push(value),
                "attributes_to_be_compared" => query.attributes_to_be_compared.push(value),
                other => debug!("Ignoring query parameter {}", other),
            }
        }
        query
    }
}

/// Compare the chosen hospitals on the chosen attributes
pub async fn get_compare(
    State(state): State<Arc<AppState>>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Comparison>, ApiError> {
    telemetry::record_request("compare");
    let Query(pairs) = pairs.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let query = CompareQuery::from_pairs(pairs);
    info!(
        "Comparing hospitals {:?} on {:?}",
        query.chosen_hospitals, query.attributes_to_be_compared
    );

    let table = Arc::clone(&state.table);
    let started = Instant::now();
    let result = tokio::task::spawn_blocking(move || {
        compare(&table, &query.chosen_hospitals, &query.attributes_to_be_compared)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("comparison task failed: {e}")))?;
    telemetry::record_compare_duration(started.elapsed());

    match result {
        Ok(comparison) => Ok(Json(comparison)),
        Err(e) => {
            telemetry::record_rejection(match e {
                CompareError::InvalidSelection(_) => "invalid_selection",
                CompareError::UnknownHospital(_) => "unknown_hospital",
                CompareError::UnknownAttribute(_) => "unknown_attribute",
            });
            Err(e.into())
        }
    }
}
