//! Builds a patient report from a measurement history.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info};

use tension_guide_domain::services::alerts::{ClassificationEvent, NotificationKind};
use tension_guide_domain::services::{BloodPressureServiceError, BloodPressureServiceTrait};
use tension_guide_domain::{
    blood_pressure_status, BloodPressureInsights, BloodPressureStatus, Measurement, TrendSignal,
};

/// Classification of the newest measurement
#[derive(Debug, Clone, Serialize)]
pub struct LatestReading {
    pub reading: String,
    pub pulse: i32,
    pub measured_at: DateTime<Utc>,
    pub status: BloodPressureStatus,
    pub notification: NotificationKind,
}

/// Report over a patient's measurement history
#[derive(Debug, Clone, Serialize)]
pub struct PatientReport {
    pub latest: Option<LatestReading>,
    pub trend: TrendSignal,
    /// Absent when no measurement falls inside the analysis period
    pub insights: Option<BloodPressureInsights>,
    pub generated_at: DateTime<Utc>,
}

/// Read a JSON array of measurements
pub fn load_measurements(path: &Path) -> Result<Vec<Measurement>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read measurements from {}", path.display()))?;
    let measurements: Vec<Measurement> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid measurement file {}", path.display()))?;

    info!("Loaded {} measurements from {}", measurements.len(), path.display());
    Ok(measurements)
}

/// Build the report.
///
/// Measurements are sorted oldest to newest before analysis. Insights only
/// cover the `period_days` preceding the newest measurement.
pub fn build_report<S: BloodPressureServiceTrait>(
    service: &S,
    mut measurements: Vec<Measurement>,
    period_days: u32,
) -> Result<PatientReport> {
    measurements.sort_by_key(|m| m.measured_at);

    let trend = service.get_trend(&measurements);

    let latest = measurements.last().map(|m| {
        // Classified once here; the event carries the only log line for it
        let status = blood_pressure_status(m.systolic, m.diastolic);
        let event = ClassificationEvent::from_status(m.systolic, m.diastolic, &status)
            .with_measured_at(m.measured_at);
        event.log();

        LatestReading {
            reading: event.reading.clone(),
            pulse: m.pulse,
            measured_at: m.measured_at,
            status,
            notification: event.notification_kind(),
        }
    });

    let in_period: Vec<Measurement> = match measurements.last() {
        Some(newest) => {
            // A period reaching past the representable range covers the whole history
            let since = Duration::try_days(i64::from(period_days))
                .and_then(|period| newest.measured_at.checked_sub_signed(period));
            measurements
                .iter()
                .filter(|m| since.map_or(true, |since| m.measured_at >= since))
                .cloned()
                .collect()
        }
        None => Vec::new(),
    };
    debug!("{} of {} measurements inside the period", in_period.len(), measurements.len());

    let insights = match service.calculate_insights(&in_period, period_days) {
        Ok(insights) => Some(insights),
        Err(BloodPressureServiceError::InsufficientData(msg)) => {
            info!("No insights: {}", msg);
            None
        }
        Err(e) => return Err(e).context("Failed to calculate insights"),
    };

    Ok(PatientReport {
        latest,
        trend,
        insights,
        generated_at: Utc::now(),
    })
}

/// Serialize the report
pub fn render_report(report: &PatientReport, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    rendered.context("Failed to serialize report")
}
