//! Whole-Dataset Overview

use crate::builder::{categorical_distribution, continuous_distribution, CategoricalDistribution, CohortFilter, Histogram};
use crate::classifier::classify;
use crate::group::NamedGroup;
use cohort_model::{Attribute, EnrichedTable};
use serde::Serialize;
use tracing::info;

/// Distributions of every attribute over the whole table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overview {
    pub categorical: NamedGroup<CategoricalDistribution>,
    pub continuous: NamedGroup<Histogram>,
}

/// Build the overview; each continuous attribute gets its own bins
pub fn overview(table: &EnrichedTable) -> Overview {
    let classes = classify(table.model());
    let mut result = Overview::default();

    for name in &classes.categorical {
        if let Some(Attribute::Categorical(spec)) = table.model().resolve(name) {
            result
                .categorical
                .insert(name.as_str(), categorical_distribution(table, spec, CohortFilter::All));
        }
    }

    for name in &classes.continuous {
        if let Some(Attribute::Continuous(field)) = table.model().resolve(name) {
            result
                .continuous
                .insert(name.as_str(), continuous_distribution(table, field, CohortFilter::All, None));
        }
    }

    info!(
        "Built overview: {} categorical, {} continuous",
        result.categorical.len(),
        result.continuous.len()
    );
    result
}
