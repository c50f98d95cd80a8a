//! Cross-cycle aggregation and the `analyze` entry point.

pub mod aggregator;
pub mod analyzer;

pub use aggregator::*;
pub use analyzer::*;
