//! Portfolio allocation by sector, the grouping the bubble chart is drawn from.

mod allocation_model;
mod allocation_service;

pub use allocation_model::*;
pub use allocation_service::*;
