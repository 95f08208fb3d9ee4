//! HTTP API for delay prediction, health checks and Prometheus metrics

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use delay_lib::{
    features::serving_features,
    validation::validate_batch,
    DelayError, GbdtLearner, Learner, ModelManager, PredictRequest, PredictResponse,
    ServiceMetrics, StructuredLogger,
};
use prometheus::{Encoder, TextEncoder};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Shared application state
pub struct AppState<L: Learner = GbdtLearner> {
    pub models: Arc<ModelManager<L>>,
    pub metrics: ServiceMetrics,
    pub logger: StructuredLogger,
}

impl<L: Learner + 'static> AppState<L> {
    pub fn new(models: Arc<ModelManager<L>>, metrics: ServiceMetrics, logger: StructuredLogger) -> Self {
        Self {
            models,
            metrics,
            logger,
        }
    }

    fn reject(&self, status: StatusCode, err: &DelayError) -> (StatusCode, Json<PredictResponse>) {
        self.metrics.inc_requests_rejected();
        if err.is_client_error() {
            self.logger.log_request_rejected(&err.to_string());
        } else {
            error!(error = %err, "Prediction failed");
        }
        (status, Json(PredictResponse::default()))
    }
}

/// Liveness probe, independent of model readiness
async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "OK" })))
}

/// Readiness probe - returns 200 once the shared classifier is fitted
async fn readyz<L: Learner + 'static>(State(state): State<Arc<AppState<L>>>) -> impl IntoResponse {
    if state.models.is_initialized() {
        (StatusCode::OK, Json(json!({ "ready": true })))
    } else {
        let reason = state
            .models
            .failure()
            .unwrap_or_else(|| "model not initialized".to_string());
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "ready": false,
                "reason": reason,
                "source": state.models.source_description(),
            })),
        )
    }
}

/// Classify a batch of flights.
///
/// Any malformed body or invalid record rejects the whole batch with an
/// empty prediction list.
async fn predict<L: Learner + 'static>(
    State(state): State<Arc<AppState<L>>>,
    body: Bytes,
) -> (StatusCode, Json<PredictResponse>) {
    let started = Instant::now();

    let request: PredictRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            return state.reject(StatusCode::BAD_REQUEST, &DelayError::Parse(e.to_string()));
        }
    };

    if let Err(e) = validate_batch(&request.flights) {
        return state.reject(StatusCode::BAD_REQUEST, &e);
    }

    let model = match state.models.get_model() {
        Ok(model) => model,
        Err(e) => return state.reject(StatusCode::SERVICE_UNAVAILABLE, &e),
    };

    let features = serving_features(&request.flights);
    match model.predict(&features) {
        Ok(predict) => {
            state.metrics.add_flights_predicted(predict.len());
            state
                .metrics
                .observe_prediction_latency(started.elapsed().as_secs_f64());
            (StatusCode::OK, Json(PredictResponse { predict }))
        }
        Err(e) => state.reject(StatusCode::INTERNAL_SERVER_ERROR, &e),
    }
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %e, "Failed to encode metrics");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            Vec::new(),
        );
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// Create the API router
pub fn create_router<L: Learner + 'static>(state: Arc<AppState<L>>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/readyz", get(readyz::<L>))
        .route("/predict", post(predict::<L>))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve<L: Learner + 'static>(port: u16, state: Arc<AppState<L>>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
