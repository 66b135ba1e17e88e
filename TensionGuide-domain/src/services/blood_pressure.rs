use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};
use validator::Validate;

use crate::entities::blood_pressure::{
    BloodPressureInsights, BloodPressureStatus, CreateMeasurementRequest, Measurement, TrendSignal,
};
use crate::services::classification::{blood_pressure_status, format_blood_pressure};
use crate::services::trend::blood_pressure_trend;

/// Blood pressure service errors
#[derive(Debug, Error)]
pub enum BloodPressureServiceError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Insufficient data error
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}

/// Trait for blood pressure service operations
pub trait BloodPressureServiceTrait {
    /// Validate a create measurement request
    fn validate_create_request(
        &self,
        request: &CreateMeasurementRequest,
    ) -> Result<(), BloodPressureServiceError>;

    /// Classify a single measurement
    fn get_status(&self, measurement: &Measurement) -> BloodPressureStatus;

    /// Trend of a history ordered oldest to newest
    fn get_trend(&self, measurements: &[Measurement]) -> TrendSignal;

    /// Calculate blood pressure insights from measurements
    fn calculate_insights(
        &self,
        measurements: &[Measurement],
        timeframe_days: u32,
    ) -> Result<BloodPressureInsights, BloodPressureServiceError>;

    /// Check if a measurement falls in a critical category
    fn is_urgent(&self, measurement: &Measurement) -> bool {
        self.get_status(measurement).is_urgent
    }
}

/// Stateless blood pressure service
#[derive(Debug, Default, Clone, Copy)]
pub struct BloodPressureService;

impl BloodPressureService {
    /// Create a new blood pressure service
    pub fn new() -> Self {
        Self
    }
}

impl BloodPressureServiceTrait for BloodPressureService {
    fn validate_create_request(
        &self,
        request: &CreateMeasurementRequest,
    ) -> Result<(), BloodPressureServiceError> {
        if let Err(validation_errors) = request.validate() {
            // Flatten into "field: message" pairs; sort for a stable message
            let mut fields: Vec<_> = validation_errors.field_errors().into_iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));

            let error_message = fields
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors
                        .iter()
                        .map(|err| match &err.message {
                            Some(msg) => msg.to_string(),
                            None => format!("Invalid {}", field),
                        })
                        .collect();
                    format!("{}: {}", field, error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            return Err(BloodPressureServiceError::ValidationError(error_message));
        }

        if request.systolic <= request.diastolic {
            return Err(BloodPressureServiceError::ValidationError(
                "Systolic pressure must be greater than diastolic pressure".to_string(),
            ));
        }

        if request.measured_at > Utc::now() {
            return Err(BloodPressureServiceError::ValidationError(
                "Measurement time cannot be in the future".to_string(),
            ));
        }

        Ok(())
    }

    fn get_status(&self, measurement: &Measurement) -> BloodPressureStatus {
        let status = blood_pressure_status(measurement.systolic, measurement.diastolic);
        let reading = format_blood_pressure(measurement.systolic, measurement.diastolic);

        if status.is_urgent {
            warn!(%reading, category = %status.category, "Urgent blood pressure reading");
        } else {
            debug!(%reading, category = %status.category, "Classified blood pressure reading");
        }

        status
    }

    fn get_trend(&self, measurements: &[Measurement]) -> TrendSignal {
        let trend = blood_pressure_trend(measurements);
        debug!(readings = measurements.len(), %trend, "Computed blood pressure trend");
        trend
    }

    fn calculate_insights(
        &self,
        measurements: &[Measurement],
        timeframe_days: u32,
    ) -> Result<BloodPressureInsights, BloodPressureServiceError> {
        if measurements.is_empty() {
            return Err(BloodPressureServiceError::InsufficientData(
                "No readings available to generate insights".to_string(),
            ));
        }

        let mut systolic_sum: f64 = 0.0;
        let mut diastolic_sum: f64 = 0.0;
        let mut pulse_sum: f64 = 0.0;

        let mut max_systolic = i32::MIN;
        let mut max_diastolic = i32::MIN;
        let mut min_systolic = i32::MAX;
        let mut min_diastolic = i32::MAX;
        let mut urgent_count = 0;

        for measurement in measurements {
            systolic_sum += measurement.systolic as f64;
            diastolic_sum += measurement.diastolic as f64;
            pulse_sum += measurement.pulse as f64;

            max_systolic = max_systolic.max(measurement.systolic);
            max_diastolic = max_diastolic.max(measurement.diastolic);
            min_systolic = min_systolic.min(measurement.systolic);
            min_diastolic = min_diastolic.min(measurement.diastolic);

            if blood_pressure_status(measurement.systolic, measurement.diastolic).is_urgent {
                urgent_count += 1;
            }
        }

        let count = measurements.len() as f64;
        let avg_systolic = systolic_sum / count;
        let avg_diastolic = diastolic_sum / count;
        let avg_pulse = pulse_sum / count;

        // The scale is defined on whole mmHg; averages are truncated
        let status = blood_pressure_status(avg_systolic as i32, avg_diastolic as i32);
        let trend = self.get_trend(measurements);

        if urgent_count > 0 {
            warn!(urgent_count, timeframe_days, "Urgent readings found in analysis period");
        }

        Ok(BloodPressureInsights {
            avg_systolic,
            avg_diastolic,
            avg_pulse,
            max_systolic,
            max_diastolic,
            min_systolic,
            min_diastolic,
            status,
            trend,
            reading_count: measurements.len(),
            urgent_count,
            period_days: timeframe_days,
            generated_at: Utc::now(),
        })
    }
}

/// Create the default blood pressure service
pub fn create_default_blood_pressure_service() -> impl BloodPressureServiceTrait + Send + Sync {
    BloodPressureService::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::blood_pressure::CategoryName;
    use crate::testing::{measurement_at, measurement_series, valid_create_request};
    use chrono::Duration;

    #[test]
    fn test_validate_create_request_valid() {
        let service = BloodPressureService::new();
        assert!(service.validate_create_request(&valid_create_request()).is_ok());
    }

    #[test]
    fn test_validate_create_request_invalid_systolic() {
        let request = CreateMeasurementRequest {
            systolic: 350, // Too high
            ..valid_create_request()
        };

        let service = BloodPressureService::new();
        let result = service.validate_create_request(&request);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Systolic"));
    }

    #[test]
    fn test_validate_create_request_reports_every_field() {
        let request = CreateMeasurementRequest {
            systolic: 20,
            diastolic: 250,
            ..valid_create_request()
        };

        let service = BloodPressureService::new();
        let error_message = service.validate_create_request(&request).unwrap_err().to_string();
        assert!(error_message.contains("diastolic: Diastolic must be between 20 and 200"));
        assert!(error_message.contains("systolic: Systolic must be between 40 and 300"));
    }

    #[test]
    fn test_validate_create_request_systolic_not_greater_than_diastolic() {
        let request = CreateMeasurementRequest {
            systolic: 80,
            diastolic: 80,
            ..valid_create_request()
        };

        let service = BloodPressureService::new();
        let result = service.validate_create_request(&request);
        assert!(result.unwrap_err().to_string().contains("greater than"));
    }

    #[test]
    fn test_validate_create_request_future_time() {
        let request = CreateMeasurementRequest {
            measured_at: Utc::now() + Duration::days(1),
            ..valid_create_request()
        };

        let service = BloodPressureService::new();
        let result = service.validate_create_request(&request);
        assert!(result.unwrap_err().to_string().contains("future"));
    }

    #[test]
    fn test_get_status_and_urgency() {
        let service = BloodPressureService::new();

        let status = service.get_status(&measurement_at(170, 105, 0));
        assert_eq!(status.category, CategoryName::Grade2);
        assert!(status.is_urgent);
        assert!(service.is_urgent(&measurement_at(190, 115, 0)));
        assert!(!service.is_urgent(&measurement_at(150, 95, 0)));
    }

    #[test]
    fn test_calculate_insights() {
        let readings = measurement_series(&[(120, 80), (130, 85), (125, 82)]);

        let service = BloodPressureService::new();
        let insights = service.calculate_insights(&readings, 30).unwrap();

        assert_eq!(insights.reading_count, 3);
        assert_eq!(insights.period_days, 30);
        assert!((insights.avg_systolic - 125.0).abs() < f64::EPSILON);
        assert!((insights.avg_diastolic - 82.333_333).abs() < 1e-3);
        assert!((insights.avg_pulse - 72.0).abs() < f64::EPSILON);
        assert_eq!(insights.max_systolic, 130);
        assert_eq!(insights.min_diastolic, 80);
        assert_eq!(insights.status.category, CategoryName::Normal);
        assert_eq!(insights.trend, TrendSignal::InsufficientData);
        assert_eq!(insights.urgent_count, 0);
    }

    #[test]
    fn test_calculate_insights_counts_urgent_readings() {
        let readings = measurement_series(&[
            (120, 80),
            (122, 80),
            (121, 81),
            (165, 102),
            (182, 112),
            (150, 95),
        ]);

        let service = BloodPressureService::new();
        let insights = service.calculate_insights(&readings, 7).unwrap();
        assert_eq!(insights.urgent_count, 2);
        assert_eq!(insights.trend, TrendSignal::Increasing);
    }

    #[test]
    fn test_calculate_insights_empty_readings() {
        let service = BloodPressureService::new();
        let result = service.calculate_insights(&[], 30);
        assert!(result.unwrap_err().to_string().contains("No readings"));
    }
}
