//! In-memory, append-only reading store keyed by smart meter id.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use thiserror::Error;
use tracing::debug;

use super::types::ElectricityReading;

/// Failure inside the reading store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A writer panicked while holding the lock.
    #[error("reading store lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

/// Holds every meter's readings for the lifetime of the process.
///
/// Constructed once at startup and shared behind an `Arc`. A single
/// reader/writer lock covers the whole map so concurrent appends to the
/// same meter cannot lose updates. Readers receive a copy of the reading
/// set and never hold the lock while computing.
#[derive(Debug, Default)]
pub struct ReadingStore {
    readings: RwLock<HashMap<String, Vec<ElectricityReading>>>,
}

impl ReadingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `readings` to the meter's reading set, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the lock was poisoned.
    pub fn store(
        &self,
        smart_meter_id: &str,
        readings: impl IntoIterator<Item = ElectricityReading>,
    ) -> Result<(), StoreError> {
        let mut map = self.readings.write()?;
        let entry = map.entry(smart_meter_id.to_string()).or_default();
        let before = entry.len();
        entry.extend(readings);
        debug!(
            smart_meter_id,
            appended = entry.len() - before,
            total = entry.len(),
            "stored readings"
        );
        Ok(())
    }

    /// Returns a copy of the meter's readings in insertion order.
    ///
    /// Unknown meters and meters with no readings both yield `None`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the lock was poisoned.
    pub fn get(&self, smart_meter_id: &str) -> Result<Option<Vec<ElectricityReading>>, StoreError> {
        let map = self.readings.read()?;
        Ok(map
            .get(smart_meter_id)
            .filter(|readings| !readings.is_empty())
            .cloned())
    }

    /// Whether the meter has at least one stored reading.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the lock was poisoned.
    pub fn has_readings(&self, smart_meter_id: &str) -> Result<bool, StoreError> {
        let map = self.readings.read()?;
        Ok(map.get(smart_meter_id).is_some_and(|r| !r.is_empty()))
    }

    /// Ids of every meter with at least one reading, sorted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if the lock was poisoned.
    pub fn meter_ids(&self) -> Result<Vec<String>, StoreError> {
        let map = self.readings.read()?;
        let mut ids: Vec<String> = map
            .iter()
            .filter(|(_, readings)| !readings.is_empty())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Poisons the lock by panicking while holding the write guard.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = self.readings.write();
            panic!("writer panicked");
        }));
        assert!(result.is_err());
    }
}
