//! API response and query types.
//!
//! Field names use the camelCase JSON contract of the public API.

use serde::{Serialize, Serializer};

use crate::pricing::{CostComparison, PricePlan, Recommendation};

/// Ordered `(key, value)` pairs serialized as a JSON object.
///
/// Keeps insertion order on the wire, which a plain map would not.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<K, V>(pub Vec<(K, V)>);

impl<K: Serialize, V: Serialize> Serialize for OrderedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

/// Public view of a price plan.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePlanRecord {
    pub plan_id: String,
    pub plan_name: String,
    pub energy_supplier: String,
    pub unit_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_time_multiplier: Option<f64>,
}

impl From<&PricePlan> for PricePlanRecord {
    fn from(p: &PricePlan) -> Self {
        Self {
            plan_id: p.plan_id.clone(),
            plan_name: p.plan_name.clone(),
            energy_supplier: p.energy_supplier.clone(),
            unit_rate: p.unit_rate,
            peak_time_multiplier: p.peak_time_multiplier,
        }
    }
}

/// Body of `GET /price-plans/compare-all/{smartMeterId}`.
///
/// - `current_plan_id` → `pricePlanId`
/// - `costs` → `pricePlanComparisons` (`{planId: cost}` in catalog order)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostComparisonResponse {
    pub price_plan_id: String,
    pub price_plan_comparisons: OrderedMap<String, f64>,
}

impl From<CostComparison> for CostComparisonResponse {
    fn from(c: CostComparison) -> Self {
        Self {
            price_plan_id: c.current_plan_id,
            price_plan_comparisons: OrderedMap(
                c.costs.into_iter().map(|pc| (pc.plan_id, pc.cost)).collect(),
            ),
        }
    }
}

/// One recommendation on the wire: a single-key object `{planId: cost}`.
pub type RecommendationRecord = OrderedMap<String, f64>;

impl From<Recommendation> for RecommendationRecord {
    fn from(r: Recommendation) -> Self {
        OrderedMap(vec![(r.plan_id, r.cost)])
    }
}

/// Body of a successful `POST /readings/store`.
#[derive(Debug, Serialize)]
pub struct StoreReadingsResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Body of `GET /api`.
#[derive(Debug, Serialize)]
pub struct ApiInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: OrderedMap<&'static str, &'static str>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
