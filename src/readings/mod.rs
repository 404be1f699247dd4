//! Meter readings: storage, usage averaging, and startup seeding.

/// Average hourly usage over an unordered reading set.
pub mod usage;
/// Startup population of the reading store.
pub mod seed;
pub mod store;
pub mod types;

pub use store::{ReadingStore, StoreError};
pub use types::ElectricityReading;
pub use usage::average_hourly_usage;
