//! Process-wide guard on requests that reach the upstream aggregator.

mod request_budget;

pub use request_budget::RequestBudget;
