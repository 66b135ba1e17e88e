use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Severity attached to a blood pressure category, ordered from least to most severe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Healthy range, routine follow-up
    Low,
    /// Borderline values, closer monitoring
    Moderate,
    /// Hypertension requiring a medical consultation
    High,
    /// Hypertension requiring urgent care
    Critical,
}

impl RiskLevel {
    /// Symbolic identifier used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of one of the eight categories of the classification table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CategoryName {
    /// Systolic < 120 and diastolic < 80
    #[serde(rename = "optimal")]
    Optimal,

    /// Systolic 120-129 and diastolic 80-84
    #[serde(rename = "normal")]
    Normal,

    /// Systolic 130-139 or diastolic 85-89
    #[serde(rename = "high-normal")]
    HighNormal,

    /// Systolic 140-159 or diastolic 90-99
    #[serde(rename = "grade-1")]
    Grade1,

    /// Systolic 160-179 or diastolic 100-109
    #[serde(rename = "grade-2")]
    Grade2,

    /// Systolic ≥ 180 or diastolic ≥ 110
    #[serde(rename = "grade-3")]
    Grade3,

    /// Systolic ≥ 140 with diastolic < 90
    #[serde(rename = "isolated-systolic")]
    IsolatedSystolic,

    /// Systolic < 140 with diastolic ≥ 90
    #[serde(rename = "isolated-diastolic")]
    IsolatedDiastolic,
}

impl CategoryName {
    /// All category names, in table order
    pub const ALL: [CategoryName; 8] = [
        CategoryName::Optimal,
        CategoryName::Normal,
        CategoryName::HighNormal,
        CategoryName::Grade1,
        CategoryName::Grade2,
        CategoryName::Grade3,
        CategoryName::IsolatedSystolic,
        CategoryName::IsolatedDiastolic,
    ];

    /// Symbolic identifier used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryName::Optimal => "optimal",
            CategoryName::Normal => "normal",
            CategoryName::HighNormal => "high-normal",
            CategoryName::Grade1 => "grade-1",
            CategoryName::Grade2 => "grade-2",
            CategoryName::Grade3 => "grade-3",
            CategoryName::IsolatedSystolic => "isolated-systolic",
            CategoryName::IsolatedDiastolic => "isolated-diastolic",
        }
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid blood pressure category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for CategoryName {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// One row of the classification table.
///
/// Rows are defined once in [`crate::services::classification::WHO_BP_CATEGORIES`]
/// and handed out by reference; they are never built at runtime.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BloodPressureCategory {
    /// Unique symbolic identifier
    pub name: CategoryName,

    /// Display label
    pub label: &'static str,

    /// Display-only systolic range, e.g. `"140-159"`
    pub systolic_range: &'static str,

    /// Display-only diastolic range, e.g. `"90-99"`
    pub diastolic_range: &'static str,

    /// Text color token
    pub color: &'static str,

    /// Background color token
    pub bg_color: &'static str,

    /// Border color token
    pub border_color: &'static str,

    /// Severity of the category
    pub risk_level: RiskLevel,

    /// Ordered advice shown to the patient
    pub recommendations: &'static [&'static str],
}

/// A blood pressure measurement as supplied by the record store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// Systolic blood pressure in mmHg (the higher number)
    pub systolic: i32,

    /// Diastolic blood pressure in mmHg (the lower number)
    pub diastolic: i32,

    /// Pulse rate in beats per minute
    pub pulse: i32,

    /// Optional measurement context (e.g. `repos`, `stress`)
    #[serde(default)]
    pub context: Option<String>,

    /// Optional free-text comment
    #[serde(default)]
    pub comment: Option<String>,

    /// When the measurement was taken
    pub measured_at: DateTime<Utc>,
}

/// Anything that carries a systolic/diastolic pair
pub trait PressurePair {
    fn systolic(&self) -> i32;
    fn diastolic(&self) -> i32;
}

impl PressurePair for Measurement {
    fn systolic(&self) -> i32 {
        self.systolic
    }

    fn diastolic(&self) -> i32 {
        self.diastolic
    }
}

impl PressurePair for (i32, i32) {
    fn systolic(&self) -> i32 {
        self.0
    }

    fn diastolic(&self) -> i32 {
        self.1
    }
}

impl<T: PressurePair + ?Sized> PressurePair for &T {
    fn systolic(&self) -> i32 {
        (**self).systolic()
    }

    fn diastolic(&self) -> i32 {
        (**self).diastolic()
    }
}

/// Request payload for recording a new measurement
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeasurementRequest {
    /// Systolic blood pressure (the higher number)
    #[validate(range(min = 40, max = 300, message = "Systolic must be between 40 and 300"))]
    pub systolic: i32,

    /// Diastolic blood pressure (the lower number)
    #[validate(range(min = 20, max = 200, message = "Diastolic must be between 20 and 200"))]
    pub diastolic: i32,

    /// Pulse rate in beats per minute
    #[validate(range(min = 20, max = 250, message = "Pulse must be between 20 and 250"))]
    pub pulse: i32,

    /// Optional measurement context
    #[validate(length(max = 50, message = "Context cannot exceed 50 characters"))]
    pub context: Option<String>,

    /// Optional comment about the measurement
    #[validate(length(max = 1000, message = "Comment cannot exceed 1000 characters"))]
    pub comment: Option<String>,

    /// When the measurement was taken
    pub measured_at: DateTime<Utc>,
}

impl From<CreateMeasurementRequest> for Measurement {
    fn from(request: CreateMeasurementRequest) -> Self {
        Measurement {
            systolic: request.systolic,
            diastolic: request.diastolic,
            pulse: request.pulse,
            context: request.context,
            comment: request.comment,
            measured_at: request.measured_at,
        }
    }
}

/// Display-ready classification of a single reading
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BloodPressureStatus {
    pub category: CategoryName,
    pub label: &'static str,
    pub color: &'static str,
    pub bg_color: &'static str,
    pub border_color: &'static str,
    pub risk_level: RiskLevel,
    pub recommendations: &'static [&'static str],
    pub systolic_range: &'static str,
    pub diastolic_range: &'static str,

    /// True when the risk level is critical
    pub is_urgent: bool,

    /// True when the risk level is high or critical
    pub needs_consultation: bool,
}

impl From<&BloodPressureCategory> for BloodPressureStatus {
    fn from(category: &BloodPressureCategory) -> Self {
        BloodPressureStatus {
            category: category.name,
            label: category.label,
            color: category.color,
            bg_color: category.bg_color,
            border_color: category.border_color,
            risk_level: category.risk_level,
            recommendations: category.recommendations,
            systolic_range: category.systolic_range,
            diastolic_range: category.diastolic_range,
            is_urgent: category.risk_level == RiskLevel::Critical,
            needs_consultation: matches!(
                category.risk_level,
                RiskLevel::High | RiskLevel::Critical
            ),
        }
    }
}

/// Direction of a reading history
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrendSignal {
    /// Not enough readings to compare two windows
    InsufficientData,
    /// Recent readings are more than 5 mmHg above the older ones
    Increasing,
    /// Recent readings are more than 5 mmHg below the older ones
    Decreasing,
    /// No change beyond the 5 mmHg noise floor
    Stable,
}

impl TrendSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendSignal::InsufficientData => "insufficient_data",
            TrendSignal::Increasing => "increasing",
            TrendSignal::Decreasing => "decreasing",
            TrendSignal::Stable => "stable",
        }
    }
}

impl fmt::Display for TrendSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blood pressure insights and analytics over a set of measurements
#[derive(Debug, Clone, Serialize)]
pub struct BloodPressureInsights {
    /// Average systolic reading over the analysis period
    pub avg_systolic: f64,

    /// Average diastolic reading over the analysis period
    pub avg_diastolic: f64,

    /// Average pulse rate over the analysis period
    pub avg_pulse: f64,

    pub max_systolic: i32,
    pub max_diastolic: i32,
    pub min_systolic: i32,
    pub min_diastolic: i32,

    /// Classification of the averaged reading
    pub status: BloodPressureStatus,

    /// Direction of the most recent readings
    pub trend: TrendSignal,

    /// Number of readings analyzed
    pub reading_count: usize,

    /// Readings whose own classification is urgent
    pub urgent_count: usize,

    /// Analysis period in days
    pub period_days: u32,

    /// Timestamp of the analysis
    pub generated_at: DateTime<Utc>,
}
