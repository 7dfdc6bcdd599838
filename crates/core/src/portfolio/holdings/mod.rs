//! Holdings module - raw aggregator records and the normalization pipeline.

pub mod holdings_model;
mod holdings_normalizer;


pub use holdings_model::*;
pub use holdings_normalizer::*;
