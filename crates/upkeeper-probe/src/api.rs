//! REST API for the probe service
//!
//! Measurement requests arrive as strings and are parsed before they touch
//! the probe; parse failures are the only client errors this API returns. A
//! failed delegated check is not an error, it is the measurement's data, so
//! `/v1/measure` answers 200 either way.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;
use uuid::Uuid;

use upkeeper_common::{CallerAddress, ProbeRequest, UpkeepId};

use crate::config::RegistrySource;
use crate::metrics::ProbeMetrics;
use crate::probe::GasUsageProbe;
use crate::PROBE_VERSION;

/// Shared state for the REST handlers
#[derive(Clone)]
pub struct AppState {
    pub probe: Arc<GasUsageProbe>,
    pub metrics: Arc<ProbeMetrics>,
    pub metrics_registry: prometheus::Registry,
    pub registry_source: RegistrySource,
}

impl AppState {
    /// Build state with a fresh metrics registry.
    pub fn new(
        probe: Arc<GasUsageProbe>,
        registry_source: RegistrySource,
    ) -> Result<Self, prometheus::Error> {
        let metrics = Arc::new(ProbeMetrics::new());
        let metrics_registry = prometheus::Registry::new();
        metrics.register(&metrics_registry)?;

        Ok(Self {
            probe,
            metrics,
            metrics_registry,
            registry_source,
        })
    }
}

/// Create the REST API routes for the probe service
pub fn create_router(state: AppState) -> Router {
    // CORS layer to allow dashboard connections from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health))
        .route("/v1/version", get(version))
        .route("/v1/registry", get(registry_info))
        .route("/v1/measure", post(measure))
        .route("/metrics", get(metrics_text))
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy"}))
}

async fn version() -> Json<Value> {
    Json(json!({
        "service": "upkeeper-probe",
        "version": PROBE_VERSION,
        "description": "Gas usage measurement for registry check-upkeep calls",
    }))
}

async fn registry_info(State(state): State<AppState>) -> Json<Value> {
    let (kind, source) = state.registry_source.describe();
    Json(json!({
        "kind": kind,
        "source": source,
    }))
}

/// Body of a measure request
#[derive(Debug, Deserialize)]
struct MeasureBody {
    /// Upkeep id as `0x` hex or decimal
    upkeep_id: String,
    /// Caller address as `0x` hex
    caller: String,
}

async fn measure(
    State(state): State<AppState>,
    Json(body): Json<MeasureBody>,
) -> (StatusCode, Json<Value>) {
    let upkeep_id = match body.upkeep_id.parse::<UpkeepId>() {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": format!("invalid upkeep_id: {e}")})),
            )
        }
    };
    let caller = match body.caller.parse::<CallerAddress>() {
        Ok(caller) => caller,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": format!("invalid caller: {e}")})),
            )
        }
    };

    let request_id = Uuid::now_v7();
    let started = Instant::now();
    state.metrics.probes_total.inc();
    state.metrics.probes_active.inc();

    let result = state
        .probe
        .measure(ProbeRequest::new(upkeep_id, caller))
        .await;

    let elapsed = started.elapsed();
    state.metrics.probes_active.dec();
    state
        .metrics
        .measure_duration_seconds
        .observe(elapsed.as_secs_f64());
    state.metrics.gas_used_total.inc_by(result.gas_used().units());
    if !result.succeeded() {
        state.metrics.probes_failed_total.inc();
    }

    debug!(
        request_id = %request_id,
        succeeded = result.succeeded(),
        gas_used = result.gas_used().units(),
        latency_ms = elapsed.as_millis() as u64,
        "measure completed"
    );

    (
        StatusCode::OK,
        Json(json!({
            "request_id": request_id.to_string(),
            "upkeep_id": upkeep_id.to_string(),
            "caller": caller.to_string(),
            "succeeded": result.succeeded(),
            "perform_data": format!("0x{}", hex::encode(result.perform_data())),
            "gas_used": result.gas_used().units(),
            "measured_at": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

async fn metrics_text(State(state): State<AppState>) -> (StatusCode, String) {
    use prometheus::Encoder;

    let encoder = prometheus::TextEncoder::new();
    let families = state.metrics_registry.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to encode metrics: {e}"),
        );
    }

    match String::from_utf8(buffer) {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics are not valid UTF-8: {e}"),
        ),
    }
}
