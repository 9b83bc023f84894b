//! HTTP Route Handlers

pub mod compare;
pub mod graphs;
pub mod prometheus;
pub mod records;
pub mod stats;
