//! Prometheus metrics for the quote service.
//!
//! This module provides:
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Install the Prometheus recorder
//! - [`metrics_handler`]: Axum handler for `/metrics`
//! - Business metric helpers for quote outcomes
//!
//! Recording before [`init_metrics`] (or with metrics disabled) is a no-op.

use std::time::Duration;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Quote;
use crate::error::ErrorCode;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether metrics collection is enabled.
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "false" disables metrics (default: enabled)
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        Self { enabled }
    }
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone, Error)]
pub enum MetricsError {
    #[error("metrics are disabled")]
    Disabled,

    #[error("metrics recorder already initialized")]
    AlreadyInitialized,

    #[error("failed to install metrics recorder: {0}")]
    InstallFailed(String),
}

/// Install the Prometheus metrics recorder.
///
/// Call once at startup. Subsequent calls return
/// [`MetricsError::AlreadyInitialized`].
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// Axum handler for the `/metrics` endpoint.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Count the quotes returned in a successful response.
///
/// Increments `logifretes_quotes_served_total{service}` once per quote.
pub fn record_quotes_served(quotes: &[Quote]) {
    for quote in quotes {
        metrics::counter!(
            "logifretes_quotes_served_total",
            "service" => quote.service.tag()
        )
        .increment(1);
    }
}

/// Increments `logifretes_quote_requests_failed_total{reason}`.
pub fn record_quote_failed(code: ErrorCode) {
    metrics::counter!(
        "logifretes_quote_requests_failed_total",
        "reason" => code.as_str()
    )
    .increment(1);
}

/// Records to the `logifretes_simulated_latency_seconds` histogram.
pub fn record_simulated_latency(duration: Duration) {
    metrics::histogram!("logifretes_simulated_latency_seconds").record(duration.as_secs_f64());
}
