use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::entities::blood_pressure::{BloodPressureStatus, CategoryName, Measurement, RiskLevel};
use crate::services::classification::{blood_pressure_status, format_blood_pressure};

/// Kind of notification a classified reading calls for
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Critical reading, the patient and doctor should be alerted right away
    UrgentReading,
    /// High reading, a consultation should be scheduled
    ConsultationAdvised,
    /// Nothing to notify
    None,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::UrgentReading => write!(f, "URGENT_READING"),
            NotificationKind::ConsultationAdvised => write!(f, "CONSULTATION_ADVISED"),
            NotificationKind::None => write!(f, "NONE"),
        }
    }
}

/// Record of a classified reading
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationEvent {
    /// Reading as displayed, e.g. `150/95 mmHg`
    pub reading: String,
    pub category: CategoryName,
    pub risk_level: RiskLevel,
    pub is_urgent: bool,
    pub needs_consultation: bool,
    /// When the reading was measured, if known
    pub measured_at: Option<DateTime<Utc>>,
    /// Patient the reading belongs to (if available)
    pub patient_id: Option<String>,
    /// When the event was recorded
    pub timestamp: DateTime<Utc>,
}

impl ClassificationEvent {
    /// Create an event for a raw systolic/diastolic pair
    pub fn new(systolic: i32, diastolic: i32) -> Self {
        Self::from_status(systolic, diastolic, &blood_pressure_status(systolic, diastolic))
    }

    /// Create an event for an already computed status
    pub fn from_status(systolic: i32, diastolic: i32, status: &BloodPressureStatus) -> Self {
        Self {
            reading: format_blood_pressure(systolic, diastolic),
            category: status.category,
            risk_level: status.risk_level,
            is_urgent: status.is_urgent,
            needs_consultation: status.needs_consultation,
            measured_at: None,
            patient_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an event for a measurement
    pub fn for_measurement(measurement: &Measurement) -> Self {
        Self::new(measurement.systolic, measurement.diastolic)
            .with_measured_at(measurement.measured_at)
    }

    /// Set the measurement time
    pub fn with_measured_at(mut self, measured_at: DateTime<Utc>) -> Self {
        self.measured_at = Some(measured_at);
        self
    }

    /// Set the patient id
    pub fn with_patient(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    /// Notification a consumer should raise for this reading
    pub fn notification_kind(&self) -> NotificationKind {
        if self.is_urgent {
            NotificationKind::UrgentReading
        } else if self.needs_consultation {
            NotificationKind::ConsultationAdvised
        } else {
            NotificationKind::None
        }
    }

    /// Emit the event through tracing
    pub fn log(&self) {
        let patient = self.patient_id.as_deref().unwrap_or("unknown");
        let measured_at = self
            .measured_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());

        if self.is_urgent {
            warn!(
                category = %self.category,
                risk_level = %self.risk_level,
                "BP-LOG [{}] [{}] [{}] [{}] {}",
                self.notification_kind(),
                patient,
                measured_at,
                self.timestamp.to_rfc3339(),
                self.reading
            );
        } else {
            info!(
                category = %self.category,
                risk_level = %self.risk_level,
                "BP-LOG [{}] [{}] [{}] [{}] {}",
                self.notification_kind(),
                patient,
                measured_at,
                self.timestamp.to_rfc3339(),
                self.reading
            );
        }
    }
}

/// Classify a measurement and log the resulting event
pub fn log_classification(
    measurement: &Measurement,
    patient_id: Option<&str>,
) -> ClassificationEvent {
    let mut event = ClassificationEvent::for_measurement(measurement);

    if let Some(id) = patient_id {
        event = event.with_patient(id);
    }

    event.log();
    event
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::measurement_at;

    #[test]
    fn test_notification_kind() {
        let kind =
            |systolic, diastolic| ClassificationEvent::new(systolic, diastolic).notification_kind();

        assert_eq!(kind(185, 115), NotificationKind::UrgentReading);
        assert_eq!(kind(165, 95), NotificationKind::UrgentReading);
        assert_eq!(kind(150, 70), NotificationKind::ConsultationAdvised);
        assert_eq!(kind(145, 92), NotificationKind::ConsultationAdvised);
        assert_eq!(kind(135, 85), NotificationKind::None);
        assert_eq!(kind(118, 76), NotificationKind::None);
    }

    #[test]
    fn test_event_fields() {
        let measurement = measurement_at(142, 88, 3);
        let event = log_classification(&measurement, Some("patient-1"));

        assert_eq!(event.reading, "142/88 mmHg");
        assert_eq!(event.category, CategoryName::IsolatedSystolic);
        assert_eq!(event.risk_level, RiskLevel::High);
        assert_eq!(event.patient_id.as_deref(), Some("patient-1"));
        assert_eq!(event.measured_at, Some(measurement.measured_at));
    }

    #[test]
    fn test_notification_kind_display() {
        assert_eq!(NotificationKind::UrgentReading.to_string(), "URGENT_READING");
        let json = serde_json::to_string(&NotificationKind::ConsultationAdvised).unwrap();
        assert_eq!(json, "\"consultation_advised\"");
    }
}
