//! Dataset Summary Statistics

use cohort_model::EnrichedTable;
use serde::{Deserialize, Serialize};

/// Source of operational figures that are not derived from the dataset
pub trait OperationalMetrics: Send + Sync {
    fn researchers(&self) -> u64;
    fn queries(&self) -> u64;
    fn compute_hours(&self) -> u64;
}

/// Fixed operational figures, usually read from configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticMetrics {
    pub researchers: u64,
    pub queries: u64,
    pub compute_hours: u64,
}

impl Default for StaticMetrics {
    fn default() -> Self {
        Self {
            researchers: 20,
            queries: 1537,
            compute_hours: 60,
        }
    }
}

impl OperationalMetrics for StaticMetrics {
    fn researchers(&self) -> u64 {
        self.researchers
    }

    fn queries(&self) -> u64 {
        self.queries
    }

    fn compute_hours(&self) -> u64 {
        self.compute_hours
    }
}

/// Header figures of the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    #[serde(rename = "Patients")]
    pub patients: u64,
    #[serde(rename = "Hospitals")]
    pub hospitals: u64,
    #[serde(rename = "Researchers")]
    pub researchers: u64,
    #[serde(rename = "Queries")]
    pub queries: u64,
    #[serde(rename = "Compute (hrs)")]
    pub compute_hours: u64,
}

/// Count patients and hospitals, and read the operational figures
pub fn summary_stats(table: &EnrichedTable, metrics: &dyn OperationalMetrics) -> SummaryStats {
    SummaryStats {
        patients: table.patient_count() as u64,
        hospitals: table.hospital_count() as u64,
        researchers: metrics.researchers(),
        queries: metrics.queries(),
        compute_hours: metrics.compute_hours(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cohort_model::{DataModel, PatientRecord};
    use derivation::derive;

    struct LiveMetrics;

    impl OperationalMetrics for LiveMetrics {
        fn researchers(&self) -> u64 {
            3
        }
        fn queries(&self) -> u64 {
            42
        }
        fn compute_hours(&self) -> u64 {
            7
        }
    }

    fn table() -> EnrichedTable {
        derive(
            DataModel::pag_default(),
            vec![
                PatientRecord::new("p1", "A"),
                PatientRecord::new("p2", "A"),
                PatientRecord::new("p3", "B"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_counts_come_from_table() {
        let stats = summary_stats(&table(), &StaticMetrics::default());
        assert_eq!(stats.patients, 3);
        assert_eq!(stats.hospitals, 2);
        assert_eq!(stats.researchers, 20);
        assert_eq!(stats.queries, 1537);
        assert_eq!(stats.compute_hours, 60);
    }

    #[test]
    fn test_injected_metrics_source() {
        let stats = summary_stats(&table(), &LiveMetrics);
        assert_eq!((stats.researchers, stats.queries, stats.compute_hours), (3, 42, 7));
    }

    #[test]
    fn test_serialized_labels_in_order() {
        let stats = summary_stats(&table(), &StaticMetrics::default());
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(
            json,
            r#"{"Patients":3,"Hospitals":2,"Researchers":20,"Queries":1537,"Compute (hrs)":60}"#
        );
    }
}
