//! Unit-pool filter state: a cost chip and a free-text search over names
//! and traits.

use crate::catalog::Unit;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CostFilter {
    #[default]
    All,
    Cost(u8),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoolFilters {
    pub cost: CostFilter,
    /// Lowercased needle; empty matches everything.
    pub search: String,
}

impl PoolFilters {
    pub fn with_search(&self, raw: &str) -> Self {
        Self {
            cost: self.cost,
            search: raw.trim().to_lowercase(),
        }
    }

    pub fn with_cost(&self, cost: CostFilter) -> Self {
        Self {
            cost,
            search: self.search.clone(),
        }
    }

    pub fn matches(&self, unit: &Unit) -> bool {
        let cost_ok = match self.cost {
            CostFilter::All => true,
            CostFilter::Cost(c) => unit.cost == c,
        };
        let search_ok = self.search.is_empty()
            || unit.name.to_lowercase().contains(&self.search)
            || unit
                .traits
                .iter()
                .any(|t| t.to_lowercase().contains(&self.search));
        cost_ok && search_ok
    }
}
