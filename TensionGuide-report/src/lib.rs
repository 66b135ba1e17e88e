// TensionGuide-report lib.rs
//
// Configuration and report building for the command-line report.

pub mod config;
pub mod report;

pub use config::{ConfigError, ReportConfig};
pub use report::{build_report, load_measurements, render_report, PatientReport};
