//! Patient Records

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use tracing::info;

/// One row of the raw dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Patient identifier
    #[serde(alias = "id")]
    pub patient_id: String,
    /// Hospital the patient belongs to
    pub hospital_name: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub date_of_diagnosis: Option<String>,
    #[serde(default)]
    pub date_of_death: Option<String>,
    /// Remaining columns (demographics), keyed by column
    #[serde(flatten)]
    pub fields: BTreeMap<String, Option<String>>,
}

impl PatientRecord {
    pub fn new(patient_id: impl Into<String>, hospital_name: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            hospital_name: hospital_name.into(),
            ..Default::default()
        }
    }

    pub fn with_field(mut self, column: &str, value: &str) -> Self {
        self.fields.insert(column.to_string(), Some(value.to_string()));
        self
    }

    pub fn born(mut self, date: &str) -> Self {
        self.date_of_birth = Some(date.to_string());
        self
    }

    pub fn diagnosed(mut self, date: &str) -> Self {
        self.date_of_diagnosis = Some(date.to_string());
        self
    }

    pub fn died(mut self, date: &str) -> Self {
        self.date_of_death = Some(date.to_string());
        self
    }

    /// Value of a column, treating blanks as missing
    pub fn value(&self, column: &str) -> Option<&str> {
        let value = match column {
            "patient_id" => Some(self.patient_id.as_str()),
            "hospital_name" => Some(self.hospital_name.as_str()),
            "date_of_birth" => self.date_of_birth.as_deref(),
            "date_of_diagnosis" => self.date_of_diagnosis.as_deref(),
            "date_of_death" => self.date_of_death.as_deref(),
            other => self.fields.get(other).and_then(|v| v.as_deref()),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

/// Read a JSON array of patient records
pub fn load_records_json<R: Read>(reader: R) -> Result<Vec<PatientRecord>, ModelError> {
    let records: Vec<PatientRecord> =
        serde_json::from_reader(reader).map_err(|e| ModelError::InvalidRecords(e.to_string()))?;
    info!("Loaded {} patient records", records.len());
    Ok(records)
}
