//! Prometheus metrics for the object-mapper client.
//!
//! All metrics follow the naming convention: `mapper_<layer>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., bus_calls_total)
//! - **Histogram**: Distribution of values (e.g., bus_call_duration_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // BUS CLIENT METRICS
    // =========================================================================

    /// Remote calls issued, by member name and outcome
    pub static ref BUS_CALLS: CounterVec = CounterVec::new(
        Opts::new("mapper_bus_calls_total", "Remote method calls issued"),
        &["member", "outcome"]  // outcome: ok or an ErrorKind label
    ).expect("metric creation failed");

    /// Remote call latency
    pub static ref BUS_CALL_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "mapper_bus_call_duration_seconds",
            "Time from issuing a remote call to its reply"
        ).buckets(exponential_buckets(0.0001, 2.0, 16).expect("valid buckets")),
        &["member"]
    ).expect("metric creation failed");

    // =========================================================================
    // ASSOCIATION RESOLVER METRICS
    // =========================================================================

    /// Resolver pipeline runs, by terminal outcome
    pub static ref RESOLVER_RUNS: CounterVec = CounterVec::new(
        Opts::new("mapper_resolver_runs_total", "Association resolver pipeline runs"),
        &["outcome"]  // outcome: merged/empty_endpoints/empty_subtree/<ErrorKind label>
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Registering twice fails with `AlreadyReg`; callers that may race should
/// treat that error as success.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(BUS_CALLS.clone()),
        Box::new(BUS_CALL_DURATION.clone()),
        Box::new(RESOLVER_RUNS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Record one finished remote call.
pub fn record_bus_call(member: &str, outcome: &str, seconds: f64) {
    crate::metric_inc!(BUS_CALLS, &[member, outcome]);
    BUS_CALL_DURATION
        .with_label_values(&[member])
        .observe(seconds);
}

/// Record one finished resolver run.
pub fn record_resolver_run(outcome: &str) {
    crate::metric_inc!(RESOLVER_RUNS, &[outcome]);
}
