// Testing utilities for the domain layer
// This module is only available in unit tests or when the "mock" feature is enabled

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::entities::blood_pressure::{CreateMeasurementRequest, Measurement};

/// Fixed reference instant so fixtures are reproducible
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Build a measurement taken `hours` after [`base_time`]
pub fn measurement_at(systolic: i32, diastolic: i32, hours: i64) -> Measurement {
    Measurement {
        systolic,
        diastolic,
        pulse: 72,
        context: None,
        comment: None,
        measured_at: base_time() + Duration::hours(hours),
    }
}

/// Build a chronologically ordered series, one measurement per day
pub fn measurement_series(pairs: &[(i32, i32)]) -> Vec<Measurement> {
    pairs
        .iter()
        .enumerate()
        .map(|(day, &(systolic, diastolic))| measurement_at(systolic, diastolic, day as i64 * 24))
        .collect()
}

/// A create request that passes validation
pub fn valid_create_request() -> CreateMeasurementRequest {
    CreateMeasurementRequest {
        systolic: 128,
        diastolic: 82,
        pulse: 72,
        context: Some("repos".to_string()),
        comment: Some("Après repos".to_string()),
        measured_at: base_time(),
    }
}
