// TensionGuide Domain
// This crate contains the blood pressure classification engine for the TensionGuide application

// Domain entities
pub mod entities;

// Services that implement business logic
pub mod services;

// Testing utilities - only available in tests or with the mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;

pub use entities::{
    BloodPressureCategory, BloodPressureInsights, BloodPressureStatus, CategoryName, Measurement,
    RiskLevel, TrendSignal,
};
pub use services::{blood_pressure_status, blood_pressure_trend, classify, format_blood_pressure};
