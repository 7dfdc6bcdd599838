//! Groups normalized holdings by sector.

use std::collections::HashMap;

use super::SectorAllocation;
use crate::portfolio::holdings::NormalizedHolding;

/// Groups holdings by sector, keeping sectors in first-seen order and
/// holdings in input order within each sector.
pub fn group_by_sector(holdings: &[NormalizedHolding]) -> Vec<SectorAllocation> {
    let mut allocations: Vec<SectorAllocation> = Vec::new();
    let mut index_by_sector: HashMap<&str, usize> = HashMap::new();

    for holding in holdings {
        let sector = holding.sector.as_deref().unwrap_or("");
        let idx = *index_by_sector.entry(sector).or_insert_with(|| {
            allocations.push(SectorAllocation::empty(sector));
            allocations.len() - 1
        });

        let allocation = &mut allocations[idx];
        allocation.percentage += holding.percentage;
        allocation.holdings.push(holding.clone());
    }

    allocations
}
