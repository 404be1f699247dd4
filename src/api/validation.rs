//! Structural validation of request input before it reaches the store
//! or the pricing engine.

use std::num::NonZeroUsize;

use serde_json::Value;
use thiserror::Error;

use crate::readings::ElectricityReading;

/// Input rejected at the boundary. The message is returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A reading submission that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreReadingsRequest {
    pub smart_meter_id: String,
    pub electricity_readings: Vec<ElectricityReading>,
}

/// Validates a `POST /readings/store` payload.
///
/// Checks run in order and the first failure is reported:
/// body present, `smartMeterId` a non-blank string, `electricityReadings`
/// a non-empty array, and every reading carrying a whole-second `time`
/// and a non-negative `reading`.
///
/// # Errors
///
/// Returns a `ValidationError` naming the first offending field.
pub fn validate_readings_request(body: &Value) -> Result<StoreReadingsRequest, ValidationError> {
    if body.is_null() {
        return Err(ValidationError::new("Request body is required"));
    }

    let smart_meter_id = match body.get("smartMeterId") {
        Some(Value::String(id)) if !id.is_empty() => id,
        _ => return Err(ValidationError::new("Invalid or missing smartMeterId")),
    };
    if smart_meter_id.trim().is_empty() {
        return Err(ValidationError::new("smartMeterId cannot be empty"));
    }

    let Some(Value::Array(items)) = body.get("electricityReadings") else {
        return Err(ValidationError::new("electricityReadings must be an array"));
    };
    if items.is_empty() {
        return Err(ValidationError::new("electricityReadings cannot be empty"));
    }

    let electricity_readings = items
        .iter()
        .enumerate()
        .map(|(i, item)| validate_reading(i, item))
        .collect::<Result<_, _>>()?;

    Ok(StoreReadingsRequest {
        smart_meter_id: smart_meter_id.clone(),
        electricity_readings,
    })
}

fn validate_reading(index: usize, item: &Value) -> Result<ElectricityReading, ValidationError> {
    let fail = |message: &str| ValidationError::new(format!("Reading at index {index}: {message}"));

    let time = match item.get("time") {
        None | Some(Value::Null) => return Err(fail("missing time field")),
        Some(Value::Number(n)) => n,
        Some(_) => return Err(fail("time must be a valid number")),
    };
    let time = whole_seconds(time).ok_or_else(|| fail("time must be a whole number of seconds"))?;

    let reading = match item.get("reading") {
        None | Some(Value::Null) => return Err(fail("missing reading field")),
        Some(Value::Number(n)) => n.as_f64().filter(|r| r.is_finite()),
        Some(_) => None,
    };
    let reading = reading.ok_or_else(|| fail("reading must be a valid number"))?;
    if reading < 0.0 {
        return Err(fail("reading must be non-negative"));
    }

    Ok(ElectricityReading::new(time, reading))
}

/// Accepts integers and integral floats (`1700000000.0`) that fit in `i64`.
fn whole_seconds(n: &serde_json::Number) -> Option<i64> {
    if let Some(secs) = n.as_i64() {
        return Some(secs);
    }
    let secs = n.as_f64()?;
    let in_range = secs >= i64::MIN as f64 && secs < i64::MAX as f64;
    (secs.fract() == 0.0 && in_range).then_some(secs as i64)
}

/// Validates a meter id taken from a path segment.
///
/// # Errors
///
/// Returns a `ValidationError` if the id is empty or only whitespace.
pub fn validate_smart_meter_id(smart_meter_id: &str) -> Result<&str, ValidationError> {
    if smart_meter_id.is_empty() {
        return Err(ValidationError::new("Smart meter ID is required"));
    }
    if smart_meter_id.trim().is_empty() {
        return Err(ValidationError::new("Smart meter ID cannot be empty"));
    }
    Ok(smart_meter_id)
}

/// Parses the optional `limit` query parameter. An empty value counts as absent.
///
/// # Errors
///
/// Returns a `ValidationError` unless the value is an integer >= 1.
pub fn parse_limit(raw: Option<&str>) -> Result<Option<NonZeroUsize>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<NonZeroUsize>()
            .map(Some)
            .map_err(|_| ValidationError::new("Limit must be a positive integer")),
    }
}
