//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use joi_energy::config::ServiceConfig;
use joi_energy::pricing::PlanCatalog;
use joi_energy::readings::seed::seed_store;
use joi_energy::readings::{ElectricityReading, ReadingStore};

/// Fixed "now" for generated readings (2023-11-14T22:13:20Z).
pub const NOW: i64 = 1_700_000_000;

/// Default catalog: three plans (rates 10, 2, 1) and five meter accounts.
pub fn default_catalog() -> PlanCatalog {
    ServiceConfig::default().catalog()
}

/// Store seeded like a fresh process: five meters, five readings each.
pub fn seeded_store() -> ReadingStore {
    let config = ServiceConfig::default();
    let store = ReadingStore::new();
    seed_store(
        &store,
        config.seed_meter_ids(),
        config.seed.readings_per_meter,
        config.seed.rng_seed,
        NOW,
    )
    .expect("seeding should succeed");
    store
}

/// Builds readings from `(time, kWh)` pairs.
pub fn readings(pairs: &[(i64, f64)]) -> Vec<ElectricityReading> {
    pairs
        .iter()
        .map(|&(time, reading)| ElectricityReading::new(time, reading))
        .collect()
}
