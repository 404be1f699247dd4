//! Per-plan cost comparison for a meter's usage.

use tracing::debug;

use super::catalog::PlanCatalog;
use super::plan::PricePlan;
use crate::readings::{ElectricityReading, ReadingStore, StoreError, average_hourly_usage};

/// Plan id reported for meters without a plan assignment.
pub const UNKNOWN_PLAN_ID: &str = "unknown";

/// Projected cost of one plan for a meter.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanCost {
    pub plan_id: String,
    /// Cost rounded to 2 decimal places.
    pub cost: f64,
}

/// Costs of every catalog plan for one meter, in catalog order.
///
/// Derived on every query and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CostComparison {
    /// The meter's current plan, or [`UNKNOWN_PLAN_ID`].
    pub current_plan_id: String,
    /// One entry per catalog plan.
    pub costs: Vec<PlanCost>,
}

impl CostComparison {
    /// Looks up the cost of a single plan.
    pub fn cost_of(&self, plan_id: &str) -> Option<f64> {
        self.costs
            .iter()
            .find(|c| c.plan_id == plan_id)
            .map(|c| c.cost)
    }
}

/// Rounds to 2 decimal places, halves rounding up.
///
/// Ties are broken on the binary value of `value * 100`, so a decimal
/// literal like `1.005` (stored just below) rounds down.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Unrounded cost of a reading set under one plan.
///
/// Average hourly usage multiplied by the plan's unit rate. An empty
/// reading set costs nothing.
pub fn calculate_cost(readings: &[ElectricityReading], plan: &PricePlan) -> f64 {
    if readings.is_empty() {
        return 0.0;
    }
    average_hourly_usage(readings) * plan.unit_rate
}

/// Prices a non-empty reading set under every catalog plan.
///
/// # Arguments
///
/// * `readings` - Meter readings in any order
/// * `catalog` - Plans to compare, in catalog order
/// * `smart_meter_id` - Meter whose current plan is reported
///
/// # Returns
///
/// A `CostComparison` with one rounded cost per catalog plan.
pub fn compare_plans(
    readings: &[ElectricityReading],
    catalog: &PlanCatalog,
    smart_meter_id: &str,
) -> CostComparison {
    let current_plan_id = catalog
        .plan_for_meter(smart_meter_id)
        .map_or(UNKNOWN_PLAN_ID, |p| p.plan_id.as_str())
        .to_string();

    let costs = catalog
        .plans()
        .iter()
        .map(|plan| PlanCost {
            plan_id: plan.plan_id.clone(),
            cost: round_to_cents(calculate_cost(readings, plan)),
        })
        .collect();

    CostComparison {
        current_plan_id,
        costs,
    }
}

/// Compares every catalog plan against a stored meter's usage.
///
/// Returns `Ok(None)` when the meter has no readings; that is an expected
/// outcome, not an error.
///
/// # Errors
///
/// Returns `StoreError` if the reading store is unusable.
pub fn compare_all_plans(
    store: &ReadingStore,
    catalog: &PlanCatalog,
    smart_meter_id: &str,
) -> Result<Option<CostComparison>, StoreError> {
    let Some(readings) = store.get(smart_meter_id)? else {
        debug!(smart_meter_id, "no readings to compare");
        return Ok(None);
    };
    Ok(Some(compare_plans(&readings, catalog, smart_meter_id)))
}
