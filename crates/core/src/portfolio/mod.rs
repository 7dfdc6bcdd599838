//! Portfolio domain: aggregator holdings, their normalized view and
//! sector-level allocation.

pub mod allocation;
pub mod holdings;

pub use allocation::*;
pub use holdings::*;
