//! Derivation Error Types

use thiserror::Error;

/// Errors while deriving computed fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    /// A present date does not match `YYYY-MM-DD`
    #[error("Invalid date in {column} for patient {patient_id}: {value:?} is not YYYY-MM-DD")]
    DataFormat {
        patient_id: String,
        column: &'static str,
        value: String,
    },
}
