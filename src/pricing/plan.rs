//! Price plan and meter account records.

use serde::Deserialize;

/// A named tariff with a flat per-kWh unit rate.
///
/// Loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricePlan {
    /// Unique plan identifier.
    pub plan_id: String,
    /// Human-readable plan name.
    pub plan_name: String,
    /// Supplier offering the plan.
    pub energy_supplier: String,
    /// Price per kWh (must be > 0).
    pub unit_rate: f64,
    /// Reserved for peak-hour pricing. Not used in cost calculations.
    #[serde(default)]
    pub peak_time_multiplier: Option<f64>,
}

impl PricePlan {
    /// Creates a plan without a peak-time multiplier.
    pub fn new(plan_id: &str, plan_name: &str, energy_supplier: &str, unit_rate: f64) -> Self {
        Self {
            plan_id: plan_id.to_string(),
            plan_name: plan_name.to_string(),
            energy_supplier: energy_supplier.to_string(),
            unit_rate,
            peak_time_multiplier: None,
        }
    }

    /// The built-in plans, most expensive first.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("price-plan-0", "Dr Evil's Dark Energy", "Dr Evil", 10.0),
            Self::new("price-plan-1", "The Green Eco", "Green Energy", 2.0),
            Self::new("price-plan-2", "Power for Everyone", "Power Co", 1.0),
        ]
    }
}

/// Static assignment of a smart meter to its current price plan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeterAccount {
    pub smart_meter_id: String,
    pub price_plan_id: String,
}

impl MeterAccount {
    pub fn new(smart_meter_id: &str, price_plan_id: &str) -> Self {
        Self {
            smart_meter_id: smart_meter_id.to_string(),
            price_plan_id: price_plan_id.to_string(),
        }
    }

    /// The built-in accounts for `smart-meter-0` through `smart-meter-4`.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("smart-meter-0", "price-plan-0"),
            Self::new("smart-meter-1", "price-plan-1"),
            Self::new("smart-meter-2", "price-plan-0"),
            Self::new("smart-meter-3", "price-plan-2"),
            Self::new("smart-meter-4", "price-plan-1"),
        ]
    }
}
