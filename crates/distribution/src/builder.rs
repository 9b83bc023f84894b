//! Distribution Builder

use crate::binning::{BinEdges, DEFAULT_BIN_COUNT};
use cohort_model::{AttributeSpec, DerivedField, EnrichedTable, PatientRecord};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Rows a distribution is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CohortFilter<'a> {
    /// Whole table
    All,
    /// One hospital
    Hospital(&'a str),
    /// Union of several hospitals
    AnyOf(&'a [String]),
}

impl CohortFilter<'_> {
    pub fn matches(&self, record: &PatientRecord) -> bool {
        match self {
            CohortFilter::All => true,
            CohortFilter::Hospital(name) => record.hospital_name == *name,
            CohortFilter::AnyOf(names) => names.iter().any(|n| *n == record.hospital_name),
        }
    }

    /// Cohort label carried into the output
    pub fn label(&self) -> Option<String> {
        match self {
            CohortFilter::Hospital(name) => Some(name.to_string()),
            _ => None,
        }
    }
}

/// Frequency table of one categorical attribute
///
/// Labels are sorted by descending count, ties by label. Labels that do
/// not occur are left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalDistribution {
    pub attribute: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohort: Option<String>,
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

impl CategoricalDistribution {
    pub fn count(&self, label: &str) -> Option<u64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.counts[i])
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Histogram of one continuous attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub attribute: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohort: Option<String>,
    pub bin_edges: BinEdges,
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Count each distinct value of a categorical column among filtered rows
pub fn categorical_distribution(
    table: &EnrichedTable,
    spec: &AttributeSpec,
    filter: CohortFilter<'_>,
) -> CategoricalDistribution {
    let mut frequencies: HashMap<&str, u64> = HashMap::new();
    for row in table.rows().iter().filter(|r| filter.matches(&r.record)) {
        if let Some(value) = row.record.value(&spec.column) {
            *frequencies.entry(value).or_insert(0) += 1;
        }
    }

    let mut entries: Vec<(&str, u64)> = frequencies.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    debug!(
        "Categorical distribution for {} ({:?}): {} labels",
        spec.display_name,
        filter,
        entries.len()
    );

    CategoricalDistribution {
        attribute: spec.display_name.clone(),
        cohort: filter.label(),
        labels: entries.iter().map(|(l, _)| l.to_string()).collect(),
        counts: entries.iter().map(|(_, c)| *c).collect(),
    }
}

/// Non-missing values of a derived field among filtered rows
pub fn continuous_values(
    table: &EnrichedTable,
    field: DerivedField,
    filter: CohortFilter<'_>,
) -> Vec<f64> {
    table
        .rows()
        .iter()
        .filter(|r| filter.matches(&r.record))
        .filter_map(|r| r.derived.get(field))
        .collect()
}

/// Histogram of a derived field among filtered rows
///
/// Without `edges`, 50 equal-width bins span the filtered values. An empty
/// cohort gives all-zero counts.
pub fn continuous_distribution(
    table: &EnrichedTable,
    field: DerivedField,
    filter: CohortFilter<'_>,
    edges: Option<&BinEdges>,
) -> Histogram {
    let values = continuous_values(table, field, filter);
    let bin_edges = match edges {
        Some(edges) => edges.clone(),
        None => BinEdges::equal_width(&values, DEFAULT_BIN_COUNT),
    };
    let counts = bin_edges.count(values.iter().cloned());

    debug!(
        "Histogram for {} ({:?}): {} values in {} bins",
        field.display_name(),
        filter,
        values.len(),
        bin_edges.bin_count()
    );

    Histogram {
        attribute: field.display_name().to_string(),
        cohort: filter.label(),
        bin_edges,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cohort_model::DataModel;
    use derivation::derive;

    fn table() -> EnrichedTable {
        let records = vec![
            PatientRecord::new("p1", "A").with_field("sex", "female").born("1950-01-01").diagnosed("1990-01-01"),
            PatientRecord::new("p2", "A").with_field("sex", "female").born("1950-01-01").diagnosed("2000-01-01").died("2005-01-01"),
            PatientRecord::new("p3", "A").with_field("sex", "male").born("1960-01-01").diagnosed("2000-01-01"),
            PatientRecord::new("p4", "B").with_field("sex", "male").born("1970-01-01").diagnosed("2010-01-01").died("2012-01-01"),
            PatientRecord::new("p5", "B").born("1980-01-01"),
        ];
        derive(DataModel::pag_default(), records).unwrap()
    }

    fn sex(table: &EnrichedTable) -> AttributeSpec {
        table.model().spec("sex").unwrap().clone()
    }

    #[test]
    fn test_categorical_whole_table() {
        let table = table();
        let dist = categorical_distribution(&table, &sex(&table), CohortFilter::All);

        assert_eq!(dist.attribute, "Sex");
        assert_eq!(dist.cohort, None);
        assert_eq!(dist.labels, vec!["female", "male"]);
        assert_eq!(dist.counts, vec![2, 2]);
        // p5 has no sex recorded
        assert_eq!(dist.total(), 4);
    }

    #[test]
    fn test_categorical_sparse_per_hospital() {
        let table = table();
        let dist = categorical_distribution(&table, &sex(&table), CohortFilter::Hospital("B"));

        assert_eq!(dist.cohort.as_deref(), Some("B"));
        assert_eq!(dist.labels, vec!["male"]);
        assert_eq!(dist.count("female"), None);
    }

    #[test]
    fn test_categorical_sorted_by_count() {
        let table = table();
        let dist = categorical_distribution(&table, &sex(&table), CohortFilter::Hospital("A"));
        assert_eq!(dist.labels, vec!["female", "male"]);
        assert_eq!(dist.counts, vec![2, 1]);
    }

    #[test]
    fn test_continuous_skips_missing_values() {
        let table = table();

        let at_diagnosis = continuous_distribution(&table, DerivedField::AgeAtDiagnosis, CohortFilter::All, None);
        assert_eq!(at_diagnosis.counts.len(), DEFAULT_BIN_COUNT);
        assert_eq!(at_diagnosis.total(), 4);

        let survival = continuous_distribution(&table, DerivedField::SurvivalTime, CohortFilter::All, None);
        assert_eq!(survival.total(), 2);
        assert_eq!(survival.bin_edges.lower(), 2.0);
        assert_eq!(survival.bin_edges.upper(), 5.0);
    }

    #[test]
    fn test_continuous_with_supplied_edges() {
        let table = table();
        let edges = BinEdges::from_edges(vec![0.0, 45.0, 100.0]).unwrap();
        let hist = continuous_distribution(&table, DerivedField::AgeAtDiagnosis, CohortFilter::Hospital("A"), Some(&edges));

        assert_eq!(hist.bin_edges, edges);
        assert_eq!(hist.counts, vec![2, 1]);
    }

    #[test]
    fn test_continuous_empty_cohort_is_all_zero() {
        let table = table();
        let hist = continuous_distribution(&table, DerivedField::AgeAtDeath, CohortFilter::Hospital("Nowhere"), None);
        assert_eq!(hist.counts, vec![0; DEFAULT_BIN_COUNT]);
    }

    #[test]
    fn test_any_of_filter() {
        let table = table();
        let hospitals = vec!["A".to_string(), "B".to_string()];
        let values = continuous_values(&table, DerivedField::AgeAtDeath, CohortFilter::AnyOf(&hospitals));
        assert_eq!(values.len(), 2);
    }
}
