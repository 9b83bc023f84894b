//! Multi-Cohort Comparator

use crate::CompareError;
use cohort_model::{Attribute, DerivedField, EnrichedTable};
use distribution::{
    categorical_distribution, continuous_distribution, continuous_values, BinEdges,
    CategoricalDistribution, CohortFilter, NamedGroup, DEFAULT_BIN_COUNT,
};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, debug_span, warn};

/// Fewest hospitals a comparison accepts
pub const MIN_HOSPITALS: usize = 2;
/// Most hospitals a comparison accepts
pub const MAX_HOSPITALS: usize = 3;

/// One hospital's counts on the shared bins
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortHistogram {
    pub cohort: String,
    /// Non-missing values in this cohort
    pub total: u64,
    pub counts: Vec<u64>,
    /// `counts` as a percentage of `total`
    pub percent: Vec<f64>,
}

/// Overlayable histograms of one continuous attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramComparison {
    pub attribute: String,
    pub bin_edges: BinEdges,
    pub cohorts: Vec<CohortHistogram>,
}

impl HistogramComparison {
    pub fn cohort(&self, name: &str) -> Option<&CohortHistogram> {
        self.cohorts.iter().find(|c| c.cohort == name)
    }
}

/// Result of a comparison request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Comparison {
    /// Keyed `"{hospital}_{attribute}"`
    pub categorical: NamedGroup<CategoricalDistribution>,
    /// Keyed `"{attribute}_comparison"`
    pub continuous: NamedGroup<HistogramComparison>,
    /// Requested attributes that have no chart kind (identifiers, raw dates)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
}

/// Compare hospitals on the requested attributes
///
/// Validation runs first and the first failing rule rejects the whole
/// request: hospital count, attribute count, unknown hospital, unknown
/// attribute, duplicates.
pub fn compare(
    table: &EnrichedTable,
    hospitals: &[String],
    attributes: &[String],
) -> Result<Comparison, CompareError> {
    let _span = debug_span!("compare", ?hospitals, ?attributes).entered();

    let resolved = validate(table, hospitals, attributes)?;
    let mut comparison = Comparison::default();

    for attribute in resolved {
        match attribute {
            Attribute::Categorical(spec) => {
                for hospital in hospitals {
                    let distribution =
                        categorical_distribution(table, spec, CohortFilter::Hospital(hospital));
                    comparison
                        .categorical
                        .insert(format!("{hospital}_{}", spec.display_name), distribution);
                }
            }
            Attribute::Continuous(field) => {
                let histograms = compare_continuous(table, field, hospitals);
                comparison
                    .continuous
                    .insert(format!("{}_comparison", field.display_name()), histograms);
            }
            Attribute::Other(spec) => {
                warn!(
                    "Attribute {} is neither categorical nor continuous; no chart produced",
                    spec.display_name
                );
                comparison.skipped.push(spec.display_name.clone());
            }
        }
    }

    debug!(
        "Comparison done: {} categorical, {} continuous, {} skipped",
        comparison.categorical.len(),
        comparison.continuous.len(),
        comparison.skipped.len()
    );
    Ok(comparison)
}

fn validate<'t>(
    table: &'t EnrichedTable,
    hospitals: &[String],
    attributes: &[String],
) -> Result<Vec<Attribute<'t>>, CompareError> {
    if !(MIN_HOSPITALS..=MAX_HOSPITALS).contains(&hospitals.len()) {
        return Err(CompareError::InvalidSelection(
            "hospital count out of range".to_string(),
        ));
    }

    if attributes.is_empty() {
        return Err(CompareError::InvalidSelection(
            "no attributes selected".to_string(),
        ));
    }

    if let Some(unknown) = hospitals.iter().find(|h| !table.contains_hospital(h)) {
        return Err(CompareError::UnknownHospital(unknown.clone()));
    }

    let resolved = attributes
        .iter()
        .map(|name| {
            table
                .model()
                .resolve(name)
                .ok_or_else(|| CompareError::UnknownAttribute(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    if let Some(duplicate) = hospitals.iter().find(|h| !seen.insert(h.as_str())) {
        return Err(CompareError::InvalidSelection(format!(
            "duplicate hospital: {duplicate}"
        )));
    }

    let mut seen = HashSet::new();
    if let Some(duplicate) = resolved.iter().find(|a| !seen.insert(a.display_name())) {
        return Err(CompareError::InvalidSelection(format!(
            "duplicate attribute: {}",
            duplicate.display_name()
        )));
    }

    Ok(resolved)
}

/// Histograms of every hospital on edges spanning the selected hospitals only
fn compare_continuous(
    table: &EnrichedTable,
    field: DerivedField,
    hospitals: &[String],
) -> HistogramComparison {
    let selected = continuous_values(table, field, CohortFilter::AnyOf(hospitals));
    let edges = BinEdges::equal_width(&selected, DEFAULT_BIN_COUNT);

    let cohorts = hospitals
        .iter()
        .map(|hospital| {
            let histogram =
                continuous_distribution(table, field, CohortFilter::Hospital(hospital), Some(&edges));
            let total = histogram.total();
            let percent = histogram
                .counts
                .iter()
                .map(|&c| if total == 0 { 0.0 } else { c as f64 / total as f64 * 100.0 })
                .collect();

            CohortHistogram {
                cohort: hospital.clone(),
                total,
                counts: histogram.counts,
                percent,
            }
        })
        .collect();

    HistogramComparison {
        attribute: field.display_name().to_string(),
        bin_edges: edges,
        cohorts,
    }
}
