//! # probds Telemetry
//!
//! Logging and metrics wiring for the membership filters.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` registry with an `EnvFilter` and a
//!   JSON or human-readable output layer
//! - **Metrics**: Prometheus counters and histograms fed by
//!   [`PrometheusRecorder`], an implementation of the filters'
//!   `MetricsRecorder` hook
//!
//! ## Usage
//!
//! ```rust,ignore
//! use probds_membership::BloomFilter;
//! use probds_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let telemetry = init_telemetry(&TelemetryConfig::from_env())?;
//! let mut filter = BloomFilter::new(10_000, 0.01)?.with_metrics(telemetry.recorder());
//! filter.add(b"hello")?;
//!
//! println!("{}", probds_telemetry::gather_metrics()?);
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PROBDS_SERVICE_NAME` | `probds` | Service name in log records |
//! | `PROBDS_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `PROBDS_CONSOLE_OUTPUT` | `true` | Print log records |
//! | `PROBDS_JSON_LOGS` | `false` | JSON instead of human-readable output |
//! | `PROBDS_METRICS_ENABLED` | `true` | Report filter operations to Prometheus |

mod config;
mod logging;
pub mod metrics;

use std::sync::Arc;

use probds_membership::{MetricsRecorder, NoOpMetrics};
use thiserror::Error;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};
pub use metrics::{gather_metrics, register_metrics, MetricsHandle, PrometheusRecorder};

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result of [`init_telemetry`]: the recorder filters should report to
pub struct Telemetry {
    recorder: Option<PrometheusRecorder>,
}

impl Telemetry {
    /// Recorder for `with_metrics`; a no-op when metrics are disabled
    pub fn recorder(&self) -> Arc<dyn MetricsRecorder> {
        match &self.recorder {
            Some(recorder) => Arc::new(recorder.clone()),
            None => Arc::new(NoOpMetrics),
        }
    }

    /// Whether filter operations reach Prometheus
    pub fn metrics_enabled(&self) -> bool {
        self.recorder.is_some()
    }
}

/// Initialize logging and, if enabled, Prometheus metrics.
///
/// Logging can only be installed once per process; a second call fails with
/// `LoggingInit`.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<Telemetry, TelemetryError> {
    // Metrics first so a logging failure leaves them usable
    let recorder = if config.metrics_enabled {
        Some(PrometheusRecorder::new()?)
    } else {
        None
    };

    init_logging(config)?;

    Ok(Telemetry { recorder })
}

/// Recorder for `config` without touching the global subscriber
pub fn recorder_for(config: &TelemetryConfig) -> Result<Arc<dyn MetricsRecorder>, TelemetryError> {
    if config.metrics_enabled {
        Ok(Arc::new(PrometheusRecorder::new()?))
    } else {
        Ok(Arc::new(NoOpMetrics))
    }
}
