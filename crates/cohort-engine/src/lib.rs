//! Cohort Analytics Engine
//!
//! Compares two or three hospital cohorts on shared axes and summarizes the
//! dataset for the dashboard header.

mod comparator;
mod stats;

pub use comparator::{compare, CohortHistogram, Comparison, HistogramComparison, MAX_HOSPITALS, MIN_HOSPITALS};
pub use stats::{summary_stats, OperationalMetrics, StaticMetrics, SummaryStats};

use thiserror::Error;

/// Errors rejecting a comparison request
///
/// Raised before any computation; a failed request produces no output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
    #[error("Unknown hospital: {0}")]
    UnknownHospital(String),
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),
}
