//! Reading value types.

use serde::{Deserialize, Serialize};

/// Number of seconds in one hour, used to convert reading spans to hours.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// A single timestamped energy measurement from a smart meter.
///
/// # Fields
/// * `time` - Unix timestamp in seconds
/// * `reading` - Energy consumed in kWh (never negative once stored)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectricityReading {
    pub time: i64,
    pub reading: f64,
}

impl ElectricityReading {
    /// Creates a reading at `time` (epoch seconds) with `reading` kWh.
    pub fn new(time: i64, reading: f64) -> Self {
        Self { time, reading }
    }
}
