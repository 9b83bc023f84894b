//! Categorical Domain Audit

use cohort_model::{DataModel, EnrichedTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A categorical value outside its declared set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainViolation {
    pub patient_id: String,
    pub column: String,
    pub value: String,
}

/// Result of auditing a table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainReport {
    /// Whether all values are inside their domain
    pub valid: bool,
    /// Out-of-domain values found
    pub violations: Vec<DomainViolation>,
    /// Number of present categorical values checked
    pub fields_checked: usize,
}

/// Checks categorical values against the allowed sets of the data model
///
/// Reports only; the table is never modified.
pub struct DomainValidator<'a> {
    model: &'a DataModel,
}

impl<'a> DomainValidator<'a> {
    pub fn new(model: &'a DataModel) -> Self {
        Self { model }
    }

    /// Check a single value; missing values are always accepted
    pub fn validate_value(&self, column: &str, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return true;
        };
        match self.model.spec(column).and_then(|s| s.allowed_values()) {
            Some(allowed) => allowed.iter().any(|a| a == value),
            None => true,
        }
    }

    /// Audit every categorical value of the table
    pub fn audit(&self, table: &EnrichedTable) -> DomainReport {
        let mut violations = Vec::new();
        let mut fields_checked = 0;

        for spec in self.model.categorical() {
            for row in table.rows() {
                let Some(value) = row.record.value(&spec.column) else {
                    continue;
                };
                fields_checked += 1;

                if !self.validate_value(&spec.column, Some(value)) {
                    violations.push(DomainViolation {
                        patient_id: row.record.patient_id.clone(),
                        column: spec.column.clone(),
                        value: value.to_string(),
                    });
                }
            }
        }

        if violations.is_empty() {
            debug!("Domain audit passed: {} values checked", fields_checked);
        } else {
            warn!(
                "Domain audit found {} out-of-domain values in {} checked",
                violations.len(),
                fields_checked
            );
        }

        DomainReport {
            valid: violations.is_empty(),
            violations,
            fields_checked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive;
    use cohort_model::PatientRecord;

    #[test]
    fn test_validate_value() {
        let model = DataModel::pag_default();
        let validator = DomainValidator::new(&model);

        assert!(validator.validate_value("sex", Some("female")));
        assert!(!validator.validate_value("sex", Some("Female")));
        assert!(validator.validate_value("sex", None));
        assert!(validator.validate_value("hospital_name", Some("anything")));
    }

    #[test]
    fn test_audit_reports_violations() {
        let model = DataModel::pag_default();
        let table = derive(
            model.clone(),
            vec![
                PatientRecord::new("p1", "A").with_field("sex", "male").with_field("rurality", "Rural"),
                PatientRecord::new("p2", "A").with_field("sex", "unknown"),
                PatientRecord::new("p3", "B"),
            ],
        )
        .unwrap();

        let report = DomainValidator::new(&model).audit(&table);
        assert!(!report.valid);
        assert_eq!(report.fields_checked, 3);
        assert_eq!(
            report.violations,
            vec![DomainViolation {
                patient_id: "p2".to_string(),
                column: "sex".to_string(),
                value: "unknown".to_string(),
            }]
        );
    }
}
