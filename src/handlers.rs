use crate::errors::AppError;
use crate::models::{PredictionOutcome, StatsRequest};
use crate::predictor::LeadPredictor;
use crate::request_builder::build_record;
use crate::stats::LeadDashboard;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, map_response_body::MapResponseBodyLayer,
    trace::TraceLayer,
};

/// Largest accepted request body. A lead is a few dozen short fields.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Runs one scoring round per submitted lead.
    pub predictor: LeadPredictor,
}

/// Builds the HTTP surface the lead form talks to.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/leads/predict", post(predict_lead))
        .route("/api/v1/leads/stats", post(lead_stats))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // the form is served from a different origin
                .layer(CorsLayer::permissive())
                // CorsLayer needs a `Default` response body; re-box the limit body
                .layer(MapResponseBodyLayer::new(axum::body::Body::new))
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        )
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "lead-scoring-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/v1/leads/predict
///
/// Scores one lead submitted by the form. A scorer failure still answers
/// 200: the body carries a fallback result and the failure message in
/// `error`.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `payload` - Raw form fields as a JSON object.
///
/// # Returns
///
/// * `Result<Json<PredictionOutcome>, AppError>` - The outcome, or 400 when the body is not a JSON object.
pub async fn predict_lead(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionOutcome>, AppError> {
    let Json(payload) = payload?;
    let raw = match payload {
        Value::Object(raw) => raw,
        other => {
            return Err(AppError::BadRequest(format!(
                "Lead must be a JSON object, got {}",
                json_kind(&other)
            )));
        }
    };

    tracing::info!("POST /leads/predict - {} fields submitted", raw.len());

    let record = build_record(&raw);
    let outcome = state.predictor.predict(record).await;

    Ok(Json(outcome))
}

/// POST /api/v1/leads/stats
///
/// Summary cards, tier distribution and score histogram for a set of leads.
pub async fn lead_stats(
    request: Result<Json<StatsRequest>, JsonRejection>,
) -> Result<Json<LeadDashboard>, AppError> {
    let Json(request) = request?;
    tracing::info!("POST /leads/stats - {} leads", request.leads.len());
    Ok(Json(LeadDashboard::from_leads(&request.leads)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
