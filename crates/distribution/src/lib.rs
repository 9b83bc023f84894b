//! Distribution Builder
//!
//! Classifies attributes and turns the enriched table into chart-ready
//! frequency tables and histograms.

mod binning;
mod builder;
mod classifier;
mod group;
mod overview;

pub use binning::{BinEdges, DEFAULT_BIN_COUNT};
pub use builder::{
    categorical_distribution, continuous_distribution, continuous_values, CategoricalDistribution,
    CohortFilter, Histogram,
};
pub use classifier::{classify, AttributeClasses};
pub use group::NamedGroup;
pub use overview::{overview, Overview};
