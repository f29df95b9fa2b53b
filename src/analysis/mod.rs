//! Contributor classification and aggregation.

pub mod aggregator;
pub mod classifier;

pub use aggregator::*;
