//! Price plans, cost comparison, and plan recommendations.

/// Plan catalog and meter-to-plan assignments.
pub mod catalog;
pub mod comparator;
pub mod plan;
/// Cost-ascending plan ranking.
pub mod recommend;

pub use catalog::PlanCatalog;
pub use comparator::{CostComparison, PlanCost, calculate_cost, compare_all_plans};
pub use plan::{MeterAccount, PricePlan};
pub use recommend::{Recommendation, recommend};
