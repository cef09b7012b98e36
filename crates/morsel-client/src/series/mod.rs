//! Chart queries over the derived dataset.

pub mod aggregate;
pub mod chart;
pub mod dataset;
pub mod types;
