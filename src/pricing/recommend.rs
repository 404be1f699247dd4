use std::num::NonZeroUsize;

use tracing::debug;

use super::catalog::PlanCatalog;
use super::comparator::{CostComparison, compare_all_plans};
use crate::readings::{ReadingStore, StoreError};

/// A plan paired with its projected (rounded) cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub plan_id: String,
    pub cost: f64,
}

/// Orders a comparison's plans from cheapest to most expensive.
///
/// The sort is stable: plans with equal cost keep catalog order. With a
/// `limit`, only the first `limit` plans are kept.
pub fn rank(comparison: CostComparison, limit: Option<NonZeroUsize>) -> Vec<Recommendation> {
    let mut ranked: Vec<Recommendation> = comparison
        .costs
        .into_iter()
        .map(|c| Recommendation {
            plan_id: c.plan_id,
            cost: c.cost,
        })
        .collect();
    ranked.sort_by(|a, b| a.cost.total_cmp(&b.cost));

    if let Some(limit) = limit {
        ranked.truncate(limit.get());
    }
    ranked
}

/// Recommends plans for a stored meter, cheapest first.
///
/// A meter without readings gets an empty list.
///
/// # Errors
///
/// Returns `StoreError` if the reading store is unusable.
pub fn recommend(
    store: &ReadingStore,
    catalog: &PlanCatalog,
    smart_meter_id: &str,
    limit: Option<NonZeroUsize>,
) -> Result<Vec<Recommendation>, StoreError> {
    let Some(comparison) = compare_all_plans(store, catalog, smart_meter_id)? else {
        return Ok(Vec::new());
    };
    let ranked = rank(comparison, limit);
    debug!(smart_meter_id, count = ranked.len(), "ranked plans");
    Ok(ranked)
}
