//! Startup seeding of the reading store, from a seeded RNG or a CSV file.

use std::io::Read;
use std::path::Path;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use super::store::{ReadingStore, StoreError};
use super::types::ElectricityReading;

/// Seconds between consecutive generated readings.
const READING_INTERVAL_SECS: i64 = 3600;

/// Range of generated reading values (kWh).
const READING_RANGE_KWH: std::ops::Range<f64> = 0.1..0.6;

/// Failure while seeding the reading store.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The CSV source could not be opened or parsed.
    #[error("seed csv: {0}")]
    Csv(#[from] csv::Error),
    /// A CSV row parsed but holds a value the store must never contain.
    #[error("seed csv row {row}: {message}")]
    InvalidRow { row: usize, message: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One row of a seed CSV file: `smart_meter_id,time,reading`.
#[derive(Debug, Deserialize)]
struct SeedRow {
    smart_meter_id: String,
    time: i64,
    reading: f64,
}

/// Generates `count` readings with descending hourly timestamps ending at `now`.
///
/// The first reading is stamped `now`, the next `now - 3600`, and so on.
/// Timestamps saturate at `i64::MIN`. Values are drawn uniformly from
/// `[0.1, 0.6)` kWh.
pub fn generate_readings(count: usize, now: i64, rng: &mut StdRng) -> Vec<ElectricityReading> {
    let mut time = now;
    (0..count)
        .map(|_| {
            let reading = ElectricityReading::new(time, rng.random_range(READING_RANGE_KWH));
            time = time.saturating_sub(READING_INTERVAL_SECS);
            reading
        })
        .collect()
}

/// Fills the store with generated readings for every meter id.
///
/// Meters are seeded in the order given from a single RNG, so a fixed
/// `seed` always produces the same readings.
///
/// # Arguments
///
/// * `store` - Store to append to
/// * `meter_ids` - Meters to seed
/// * `readings_per_meter` - Readings generated per meter
/// * `seed` - RNG seed
/// * `now` - Timestamp of the newest reading (epoch seconds)
///
/// # Returns
///
/// Total number of readings stored.
///
/// # Errors
///
/// Returns `SeedError::Store` if the store rejects the append.
pub fn seed_store<'a>(
    store: &ReadingStore,
    meter_ids: impl IntoIterator<Item = &'a str>,
    readings_per_meter: usize,
    seed: u64,
    now: i64,
) -> Result<usize, SeedError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut total = 0;
    for meter_id in meter_ids {
        let readings = generate_readings(readings_per_meter, now, &mut rng);
        total += readings.len();
        store.store(meter_id, readings)?;
    }
    info!(total, seed, "seeded generated readings");
    Ok(total)
}

/// Parses seed rows from CSV with header `smart_meter_id,time,reading`.
///
/// Rows are returned in file order. Empty meter ids and negative or
/// non-finite readings are rejected with the 1-based data row number.
///
/// # Errors
///
/// Returns `SeedError::Csv` for malformed CSV and `SeedError::InvalidRow`
/// for rows with invalid values.
pub fn read_readings_csv(reader: impl Read) -> Result<Vec<(String, ElectricityReading)>, SeedError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();

    for (idx, record) in rdr.deserialize::<SeedRow>().enumerate() {
        let row = record?;
        let row_number = idx + 1;

        if row.smart_meter_id.is_empty() {
            return Err(SeedError::InvalidRow {
                row: row_number,
                message: "smart_meter_id cannot be empty".into(),
            });
        }
        if !row.reading.is_finite() || row.reading < 0.0 {
            return Err(SeedError::InvalidRow {
                row: row_number,
                message: format!("reading must be a non-negative number, got {}", row.reading),
            });
        }

        rows.push((row.smart_meter_id, ElectricityReading::new(row.time, row.reading)));
    }

    Ok(rows)
}

/// Loads seed readings from a CSV file into the store.
///
/// The whole file is validated before anything is stored.
///
/// # Returns
///
/// Number of readings stored.
///
/// # Errors
///
/// Returns a `SeedError` if the file cannot be read, fails validation,
/// or the store rejects the append.
pub fn import_csv(store: &ReadingStore, path: &Path) -> Result<usize, SeedError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    let rows = read_readings_csv(std::io::BufReader::new(file))?;
    let total = rows.len();
    for (meter_id, reading) in rows {
        store.store(&meter_id, [reading])?;
    }
    info!(total, path = %path.display(), "imported seed readings");
    Ok(total)
}
