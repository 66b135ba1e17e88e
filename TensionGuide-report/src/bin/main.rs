use anyhow::{Context, Result};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tension_guide_domain::services::create_default_blood_pressure_service;
use tension_guide_report::{build_report, load_measurements, render_report, ReportConfig};

/// Entry point for the TensionGuide report
///
/// This function:
/// 1. Initializes environment variables from .env file
/// 2. Sets up tracing for logging (on stderr, stdout carries the report)
/// 3. Loads the measurement history named by the configuration
/// 4. Prints the JSON report
fn main() -> Result<()> {
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    let config = ReportConfig::from_env(std::env::args().nth(1))
        .context("Invalid report configuration")?;

    let measurements = load_measurements(&config.readings_path)?;
    let service = create_default_blood_pressure_service();
    let report = build_report(&service, measurements, config.period_days)?;

    println!("{}", render_report(&report, config.pretty)?);
    info!("Report complete");

    Ok(())
}
