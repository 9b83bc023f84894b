//! Logging and Prometheus Metrics

use crate::error::StartupError;
use crate::settings::LoggingSettings;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize the global tracing subscriber
pub fn init_logging(settings: &LoggingSettings) -> Result<(), StartupError> {
    let level = settings.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = FmtSubscriber::builder().with_max_level(level).with_target(true);

    let result = if settings.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| StartupError::Logging(e.to_string()))
}

/// Install the Prometheus recorder behind the `metrics` macros
pub fn install_recorder() -> Result<PrometheusHandle, StartupError> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| StartupError::Metrics(e.to_string()))
}

pub fn record_request(endpoint: &'static str) {
    counter!("cohort_requests_total", "endpoint" => endpoint).increment(1);
}

pub fn record_rejection(reason: &'static str) {
    counter!("cohort_rejected_requests_total", "reason" => reason).increment(1);
}

pub fn record_compare_duration(elapsed: Duration) {
    histogram!("cohort_compare_duration_seconds").record(elapsed.as_secs_f64());
}
