//! Allocation models for portfolio breakdown by sector.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::holdings::NormalizedHolding;

/// Holdings sharing one sector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectorAllocation {
    /// Sector name; holdings without a sector are grouped under `""`
    pub sector: String,
    /// Sum of member percentages (0-100)
    pub percentage: Decimal,
    /// Members in their original order
    pub holdings: Vec<NormalizedHolding>,
}

impl SectorAllocation {
    pub fn empty(sector: &str) -> Self {
        Self {
            sector: sector.to_string(),
            percentage: Decimal::ZERO,
            holdings: Vec::new(),
        }
    }
}
