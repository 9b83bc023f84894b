//! Cohort Data Model
//!
//! Attribute schema, patient records and the enriched table snapshot shared
//! by every analytics operation.

mod record;
mod schema;
mod table;

pub use record::{load_records_json, PatientRecord};
pub use schema::{Attribute, AttributeKind, AttributeSpec, DataModel, DerivedField};
pub use table::{DerivedValues, EnrichedRecord, EnrichedTable};

use thiserror::Error;

/// Errors while loading the data model or the records
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Invalid data model: {0}")]
    InvalidDataModel(String),
    #[error("Invalid patient records: {0}")]
    InvalidRecords(String),
}
