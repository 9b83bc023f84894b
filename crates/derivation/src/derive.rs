//! Derived Field Computation

use crate::dates::{parse_date, years_between};
use crate::error::DerivationError;
use chrono::NaiveDate;
use cohort_model::{DataModel, DerivedValues, EnrichedRecord, EnrichedTable, PatientRecord};
use tracing::{debug, info};

/// Build the enriched table from raw records
///
/// Fails on the first present date that is not `YYYY-MM-DD`; no partial
/// table is returned.
pub fn derive(model: DataModel, records: Vec<PatientRecord>) -> Result<EnrichedTable, DerivationError> {
    info!("Deriving computed fields for {} records", records.len());

    let rows = records
        .into_iter()
        .map(derive_record)
        .collect::<Result<Vec<_>, _>>()?;

    let deceased = rows.iter().filter(|r| r.derived.age_at_death.is_some()).count();
    debug!("Derived fields ready: {} rows, {} with date of death", rows.len(), deceased);

    Ok(EnrichedTable::new(model, rows))
}

/// Compute the derived values of a single record
pub fn derive_record(record: PatientRecord) -> Result<EnrichedRecord, DerivationError> {
    let birth = date_column(&record, "date_of_birth")?;
    let diagnosis = date_column(&record, "date_of_diagnosis")?;
    let death = date_column(&record, "date_of_death")?;

    let derived = DerivedValues {
        age_at_diagnosis: span(birth, diagnosis),
        age_at_death: span(birth, death),
        survival_time: span(diagnosis, death),
    };

    Ok(EnrichedRecord { record, derived })
}

fn date_column(
    record: &PatientRecord,
    column: &'static str,
) -> Result<Option<NaiveDate>, DerivationError> {
    let Some(raw) = record.value(column) else {
        return Ok(None);
    };

    parse_date(raw.trim())
        .map(Some)
        .ok_or_else(|| DerivationError::DataFormat {
            patient_id: record.patient_id.clone(),
            column,
            value: raw.to_string(),
        })
}

fn span(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<f64> {
    match (start, end) {
        (Some(start), Some(end)) => Some(years_between(start, end)),
        _ => None,
    }
}
