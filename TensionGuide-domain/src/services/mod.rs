pub mod alerts;
pub mod blood_pressure;
pub mod classification;
pub mod trend;

// Domain services
// Classification and trend analysis are pure functions; the service layer wraps them with
// validation and logging.

pub use blood_pressure::{
    create_default_blood_pressure_service, BloodPressureService, BloodPressureServiceError,
    BloodPressureServiceTrait,
};
pub use classification::{
    blood_pressure_status, category, classify, format_blood_pressure, WHO_BP_CATEGORIES,
};
pub use trend::{blood_pressure_trend, trend_of};
