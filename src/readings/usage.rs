//! Time-weighted average of a meter's reading set.

use super::types::{ElectricityReading, SECONDS_PER_HOUR};

/// Computes the average hourly usage (kWh/h) of a reading set.
///
/// Readings may arrive in any order. They are sorted by time (stable, so
/// equal timestamps keep insertion order) and summed in that order, which
/// makes the result independent of input order for distinct timestamps.
///
/// - no readings yields `0.0`
/// - a single reading yields its value as-is
/// - readings that all share one timestamp yield the undivided total
///
/// # Arguments
///
/// * `readings` - Reading set for one meter, in any order
///
/// # Returns
///
/// Total energy divided by the elapsed span in hours.
pub fn average_hourly_usage(readings: &[ElectricityReading]) -> f64 {
    match readings {
        [] => 0.0,
        [only] => only.reading,
        _ => {
            let mut sorted = readings.to_vec();
            sorted.sort_by_key(|r| r.time);

            let total_energy: f64 = sorted.iter().map(|r| r.reading).sum();
            let (first, last) = (sorted[0].time, sorted[sorted.len() - 1].time);
            let elapsed_hours = last.abs_diff(first) as f64 / SECONDS_PER_HOUR;

            if elapsed_hours == 0.0 {
                return total_energy;
            }
            total_energy / elapsed_hours
        }
    }
}
