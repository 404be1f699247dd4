//! Read-only registry of price plans and meter accounts.

use super::plan::{MeterAccount, PricePlan};

/// Price plans in catalog order plus meter-to-plan assignments.
///
/// Built once at startup and shared read-only by every request. Lookups
/// return `None` on a miss.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    plans: Vec<PricePlan>,
    accounts: Vec<MeterAccount>,
}

impl PlanCatalog {
    /// Creates a catalog. `plans` order is the order every comparison uses.
    pub fn new(plans: Vec<PricePlan>, accounts: Vec<MeterAccount>) -> Self {
        Self { plans, accounts }
    }

    /// All plans in catalog order.
    pub fn plans(&self) -> &[PricePlan] {
        &self.plans
    }

    /// All meter accounts.
    pub fn accounts(&self) -> &[MeterAccount] {
        &self.accounts
    }

    /// Looks up a plan by id.
    pub fn plan(&self, plan_id: &str) -> Option<&PricePlan> {
        self.plans.iter().find(|p| p.plan_id == plan_id)
    }

    /// Looks up the plan a meter is currently subscribed to.
    ///
    /// Returns `None` if the meter has no account or its account names a
    /// plan missing from the catalog.
    pub fn plan_for_meter(&self, smart_meter_id: &str) -> Option<&PricePlan> {
        self.accounts
            .iter()
            .find(|a| a.smart_meter_id == smart_meter_id)
            .and_then(|a| self.plan(&a.price_plan_id))
    }
}

impl Default for PlanCatalog {
    /// The built-in three-plan catalog with five meter accounts.
    fn default() -> Self {
        Self::new(PricePlan::defaults(), MeterAccount::defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_three_plans_in_order() {
        let catalog = PlanCatalog::default();
        let ids: Vec<&str> = catalog.plans().iter().map(|p| p.plan_id.as_str()).collect();
        assert_eq!(ids, vec!["price-plan-0", "price-plan-1", "price-plan-2"]);
        assert_eq!(catalog.accounts().len(), 5);
    }

    #[test]
    fn plan_lookup_hit_and_miss() {
        let catalog = PlanCatalog::default();
        assert_eq!(catalog.plan("price-plan-1").map(|p| p.unit_rate), Some(2.0));
        assert!(catalog.plan("price-plan-9").is_none());
    }

    #[test]
    fn plan_for_meter_follows_account() {
        let catalog = PlanCatalog::default();
        assert_eq!(
            catalog.plan_for_meter("smart-meter-3").map(|p| p.plan_id.as_str()),
            Some("price-plan-2")
        );
        assert!(catalog.plan_for_meter("smart-meter-99").is_none());
    }

    #[test]
    fn dangling_account_resolves_to_none() {
        let catalog = PlanCatalog::new(
            PricePlan::defaults(),
            vec![MeterAccount::new("m", "retired-plan")],
        );
        assert!(catalog.plan_for_meter("m").is_none());
    }
}
