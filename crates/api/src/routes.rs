use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use edge_core::domain::insight::CompanyInsight;
use edge_core::domain::sentiment::SentimentReading;
use edge_core::engine::InsightEngine;
use serde::Serialize;
use serde_json::{json, Value};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const SERVICE_NAME: &str = "Unlisted Edge AI Service";
pub const SERVICE_VERSION: &str = "2.1.0";

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<InsightEngine>,
}

pub fn router(state: AppState) -> Router {
    let app = Router::new()
        .route("/health", get(health))
        .route("/ai/insight", post(generate_insight))
        .route("/ai/batch-analysis", post(batch_analysis))
        .route("/ai/market-sentiment", get(market_sentiment))
        .with_state(state);
    with_middleware(app)
}

fn with_middleware(app: Router) -> Router {
    app.layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal,
}

impl ApiError {
    fn bad_request(error: impl Into<String>) -> Self {
        Self::BadRequest(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(error) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": error })),
            )
                .into_response(),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response(),
        }
    }
}

// Details stay in the logs; the client only sees the generic 500.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = detail, "request handler panicked");
    ApiError::Internal.into_response()
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    timestamp: DateTime<Utc>,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: SERVICE_VERSION,
        timestamp: Utc::now(),
    })
}

async fn generate_insight(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CompanyInsight>, ApiError> {
    let company = parse_body(&body)?
        .ok_or_else(|| ApiError::bad_request("No company data provided"))?;

    let insight = state.engine.generate_company_insight(&company).map_err(|e| {
        tracing::warn!(error = %e, "rejected company data");
        ApiError::bad_request(e.to_string())
    })?;

    Ok(Json(insight))
}

#[derive(Debug, Serialize)]
struct BatchResponse {
    success: bool,
    insights: Vec<CompanyInsight>,
    processed_count: usize,
}

async fn batch_analysis(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BatchResponse>, ApiError> {
    let body = parse_body(&body)?;
    let companies = body
        .as_ref()
        .and_then(|b| b.get("companies"))
        .and_then(Value::as_array)
        .filter(|companies| !companies.is_empty())
        .ok_or_else(|| ApiError::bad_request("No companies provided"))?;

    let insights = state.engine.batch_analyze(companies);
    tracing::info!(
        requested = companies.len(),
        processed = insights.len(),
        "batch analysis complete"
    );

    Ok(Json(BatchResponse {
        success: true,
        processed_count: insights.len(),
        insights,
    }))
}

async fn market_sentiment(State(state): State<AppState>) -> Json<SentimentReading> {
    Json(state.engine.market_sentiment())
}

/// `Ok(None)` when the body is absent or carries nothing (`null`, `{}`, `[]`,
/// `""`, `false`, `0`).
fn parse_body(body: &[u8]) -> Result<Option<Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {e}")))?;

    let empty = match &value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    };
    Ok((!empty).then_some(value))
}
