//! Observability infrastructure for the delay predictor
//!
//! Provides:
//! - Prometheus metrics (prediction latency, request outcomes, model state)
//! - Structured JSON logging with tracing

use prometheus::{
    register_gauge, register_histogram, register_int_counter, register_int_gauge, Gauge,
    Histogram, IntCounter, IntGauge,
};
use std::sync::OnceLock;
use tracing::{error, info, warn};

/// Default histogram buckets for latency measurements (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<ServiceMetricsInner> = OnceLock::new();

struct ServiceMetricsInner {
    prediction_latency_seconds: Histogram,
    flights_predicted: IntCounter,
    requests_rejected: IntCounter,
    model_fit_seconds: Gauge,
    model_ready: IntGauge,
    scale_pos_weight: Gauge,
}

impl ServiceMetricsInner {
    fn new() -> Self {
        Self {
            prediction_latency_seconds: register_histogram!(
                "delay_predictor_prediction_latency_seconds",
                "Time spent encoding and classifying one request",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register prediction_latency_seconds"),

            flights_predicted: register_int_counter!(
                "delay_predictor_flights_predicted_total",
                "Total number of flights classified"
            )
            .expect("Failed to register flights_predicted"),

            requests_rejected: register_int_counter!(
                "delay_predictor_requests_rejected_total",
                "Requests rejected as malformed or outside the trained domain"
            )
            .expect("Failed to register requests_rejected"),

            model_fit_seconds: register_gauge!(
                "delay_predictor_model_fit_seconds",
                "Duration of the model initialization pass"
            )
            .expect("Failed to register model_fit_seconds"),

            model_ready: register_int_gauge!(
                "delay_predictor_model_ready",
                "1 once the shared classifier is fitted"
            )
            .expect("Failed to register model_ready"),

            scale_pos_weight: register_gauge!(
                "delay_predictor_scale_pos_weight",
                "Positive-class weight the classifier was trained with"
            )
            .expect("Failed to register scale_pos_weight"),
        }
    }
}

/// Service metrics for Prometheus exposition
///
/// Lightweight handle to the global metrics instance; clones share the
/// same underlying metrics.
#[derive(Clone)]
pub struct ServiceMetrics {
    _private: (),
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ServiceMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ServiceMetricsInner {
        GLOBAL_METRICS.get_or_init(ServiceMetricsInner::new)
    }

    pub fn observe_prediction_latency(&self, duration_secs: f64) {
        self.inner().prediction_latency_seconds.observe(duration_secs);
    }

    pub fn add_flights_predicted(&self, count: usize) {
        self.inner().flights_predicted.inc_by(count as u64);
    }

    pub fn inc_requests_rejected(&self) {
        self.inner().requests_rejected.inc();
    }

    /// Record a completed initialization pass
    pub fn set_model_fitted(&self, fit_secs: f64, scale_pos_weight: f32) {
        self.inner().model_fit_seconds.set(fit_secs);
        self.inner().scale_pos_weight.set(f64::from(scale_pos_weight));
        self.inner().model_ready.set(1);
    }
}

/// Structured logger for service events
#[derive(Clone)]
pub struct StructuredLogger {
    service_name: String,
}

impl StructuredLogger {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    pub fn log_startup(&self, version: &str, catalogue_version: &str) {
        info!(
            event = "service_started",
            service = %self.service_name,
            version = %version,
            catalogue_version = %catalogue_version,
            "Delay predictor started"
        );
    }

    pub fn log_model_initialized(&self, source: &str, fit_secs: f64, scale_pos_weight: f32) {
        info!(
            event = "model_initialized",
            service = %self.service_name,
            source = %source,
            fit_secs = fit_secs,
            scale_pos_weight = scale_pos_weight,
            "Shared classifier fitted"
        );
    }

    pub fn log_model_initialization_failed(&self, source: &str, reason: &str) {
        error!(
            event = "model_initialization_failed",
            service = %self.service_name,
            source = %source,
            reason = %reason,
            "Shared classifier could not be fitted"
        );
    }

    pub fn log_request_rejected(&self, reason: &str) {
        warn!(
            event = "request_rejected",
            service = %self.service_name,
            reason = %reason,
            "Rejected prediction request"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            service = %self.service_name,
            reason = %reason,
            "Delay predictor shutting down"
        );
    }
}
