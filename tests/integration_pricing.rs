//! Integration tests for the seeded store and pricing engine.

mod common;

use std::num::NonZeroUsize;

use approx::assert_relative_eq;

use joi_energy::pricing::{PlanCatalog, PricePlan, calculate_cost, compare_all_plans, recommend};
use joi_energy::readings::{ReadingStore, average_hourly_usage};

#[test]
fn fresh_process_has_five_seeded_meters() {
    let store = common::seeded_store();
    let ids = store.meter_ids().unwrap();
    assert_eq!(
        ids,
        vec![
            "smart-meter-0",
            "smart-meter-1",
            "smart-meter-2",
            "smart-meter-3",
            "smart-meter-4"
        ]
    );
    for id in &ids {
        let readings = store.get(id).unwrap().unwrap();
        assert_eq!(readings.len(), 5);
        assert_eq!(readings[0].time, common::NOW);
        assert!(readings.windows(2).all(|w| w[0].time - w[1].time == 3600));
    }
}

#[test]
fn every_seeded_meter_ranks_cheapest_plan_first() {
    let store = common::seeded_store();
    let catalog = common::default_catalog();

    for id in store.meter_ids().unwrap() {
        let ranked = recommend(&store, &catalog, &id, None).unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].plan_id, "price-plan-2");
        assert!(ranked.windows(2).all(|w| w[0].cost <= w[1].cost));
    }
}

#[test]
fn comparison_matches_usage_times_rate() {
    let store = common::seeded_store();
    let catalog = common::default_catalog();
    let readings = store.get("smart-meter-2").unwrap().unwrap();
    let usage = average_hourly_usage(&readings);

    let comparison = compare_all_plans(&store, &catalog, "smart-meter-2")
        .unwrap()
        .unwrap();
    assert_eq!(comparison.current_plan_id, "price-plan-0");
    for plan in catalog.plans() {
        let expected = (usage * plan.unit_rate * 100.0).round() / 100.0;
        assert_eq!(comparison.cost_of(&plan.plan_id), Some(expected));
    }
}

#[test]
fn stored_readings_are_priced_after_append() {
    let store = ReadingStore::new();
    let catalog = common::default_catalog();
    assert!(compare_all_plans(&store, &catalog, "new-meter").unwrap().is_none());

    store.store("new-meter", common::readings(&[(0, 0.5)])).unwrap();
    store.store("new-meter", common::readings(&[(3600, 0.5)])).unwrap();

    let comparison = compare_all_plans(&store, &catalog, "new-meter")
        .unwrap()
        .unwrap();
    assert_eq!(comparison.current_plan_id, "unknown");
    assert_eq!(comparison.cost_of("price-plan-1"), Some(2.0));
}

#[test]
fn calculate_cost_example() {
    let plan = PricePlan::new("p", "Plan", "Supplier", 2.0);
    let cost = calculate_cost(&common::readings(&[(0, 0.5), (3600, 0.5)]), &plan);
    assert_relative_eq!(cost, 2.0);
}

#[test]
fn recommend_limit_and_missing_meter() {
    let store = common::seeded_store();
    let catalog = common::default_catalog();

    let two = recommend(&store, &catalog, "smart-meter-1", NonZeroUsize::new(2)).unwrap();
    assert_eq!(two.len(), 2);

    let none = recommend(&store, &catalog, "smart-meter-9", NonZeroUsize::new(2)).unwrap();
    assert!(none.is_empty());
}

#[test]
fn custom_catalog_order_is_respected() {
    let store = ReadingStore::new();
    store
        .store("m", common::readings(&[(0, 1.0), (7200, 1.0)]))
        .unwrap();
    let catalog = PlanCatalog::new(
        vec![
            PricePlan::new("b", "B", "S", 3.0),
            PricePlan::new("a", "A", "S", 3.0),
        ],
        Vec::new(),
    );

    let comparison = compare_all_plans(&store, &catalog, "m").unwrap().unwrap();
    let ids: Vec<&str> = comparison.costs.iter().map(|c| c.plan_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);

    let ranked = recommend(&store, &catalog, "m", None).unwrap();
    assert_eq!(ranked[0].plan_id, "b");
    assert_eq!(ranked[0].cost, 3.0);
}
