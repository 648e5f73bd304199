//! # Mapper Telemetry
//!
//! Logging and metrics for the object-mapper client.
//!
//! ## Components
//!
//! - **Logs**: `tracing` spans and events, rendered by `tracing-subscriber`
//!   as pretty console output or JSON lines
//! - **Metrics**: Prometheus counters and histograms for bus calls and
//!   resolver runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mapper_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_telemetry(&config).expect("Failed to init telemetry");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `object-mapper-client` | Service name in logs |
//! | `MAPPER_LOG_LEVEL` | `info` | Log level filter |
//! | `MAPPER_JSON_LOGS` | `false` | JSON log output |
//! | `MAPPER_CONSOLE_OUTPUT` | `true` | Console log output |

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};
pub use metrics::{
    encode_metrics, record_bus_call, record_resolver_run, register_metrics, BUS_CALLS,
    BUS_CALL_DURATION, RESOLVER_RUNS,
};

use thiserror::Error;

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

/// Initialize metrics and logging.
///
/// Metrics are registered first so that log lines emitted during startup
/// can already be accompanied by counters.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)?;
    Ok(())
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
