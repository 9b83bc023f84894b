//! Enriched Table Snapshot

use crate::record::PatientRecord;
use crate::schema::{DataModel, DerivedField};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Derived numeric values of one record, in years rounded to 2 decimals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedValues {
    pub age_at_diagnosis: Option<f64>,
    pub age_at_death: Option<f64>,
    pub survival_time: Option<f64>,
}

impl DerivedValues {
    pub fn get(&self, field: DerivedField) -> Option<f64> {
        match field {
            DerivedField::AgeAtDiagnosis => self.age_at_diagnosis,
            DerivedField::AgeAtDeath => self.age_at_death,
            DerivedField::SurvivalTime => self.survival_time,
        }
    }
}

/// A raw record plus its derived values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: PatientRecord,
    #[serde(flatten)]
    pub derived: DerivedValues,
}

/// Read-only table shared by every engine operation
///
/// Built once after derivation. Hand it out behind an `Arc`; nothing
/// mutates it afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichedTable {
    model: DataModel,
    rows: Vec<EnrichedRecord>,
}

impl EnrichedTable {
    pub fn new(model: DataModel, rows: Vec<EnrichedRecord>) -> Self {
        Self { model, rows }
    }

    pub fn model(&self) -> &DataModel {
        &self.model
    }

    pub fn rows(&self) -> &[EnrichedRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct hospital names in first-seen order
    pub fn hospitals(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|r| r.record.hospital_name.as_str())
            .filter(|h| seen.insert(*h))
            .collect()
    }

    pub fn contains_hospital(&self, name: &str) -> bool {
        self.rows.iter().any(|r| r.record.hospital_name == name)
    }

    /// Number of distinct patient ids
    pub fn patient_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.record.patient_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of distinct hospitals
    pub fn hospital_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.record.hospital_name.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}
