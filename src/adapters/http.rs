use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::screening::ScreeningEngine;
use crate::domain::model::{QuestionnaireResponse, ScreeningReport};
use crate::utils::error::{ErrorCategory, Result, ScreeningError};

/// Shared, read-only state handed to every handler.
///
/// `engine` is `None` when the model artifact failed to load at startup; the
/// probes still answer and `/predict` fails with 500.
#[derive(Clone, Default)]
pub struct AppState {
    pub engine: Option<Arc<ScreeningEngine>>,
}

impl AppState {
    pub fn new(engine: Option<ScreeningEngine>) -> Self {
        Self {
            engine: engine.map(Arc::new),
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.engine.is_some()
    }
}

#[derive(Debug, Serialize)]
struct HomeResponse {
    status: &'static str,
    model_loaded: bool,
    endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
struct Endpoints {
    predict: &'static str,
    health: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Handler error; renders as `{"error": "..."}` with a status derived from the error category.
#[derive(Debug)]
pub struct ApiError(pub ScreeningError);

impl From<ScreeningError> for ApiError {
    fn from(err: ScreeningError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self.0.category() {
            ErrorCategory::Client => StatusCode::BAD_REQUEST,
            ErrorCategory::Model | ErrorCategory::Configuration | ErrorCategory::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self.0 {
            ScreeningError::InvalidRequest { message } => {
                tracing::warn!("Rejected prediction request: {}", message)
            }
            ScreeningError::ModelNotLoaded => {
                tracing::warn!("Prediction requested but model is not loaded")
            }
            err => tracing::error!(
                "Error during prediction: {} (Category: {:?}, Severity: {:?})",
                err,
                err.category(),
                err.severity()
            ),
        }

        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .with_state(state)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutdown signal received");
}

async fn home(State(state): State<AppState>) -> Json<HomeResponse> {
    Json(HomeResponse {
        status: "running",
        model_loaded: state.model_loaded(),
        endpoints: Endpoints {
            predict: "/predict (POST)",
            health: "/health (GET)",
        },
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_loaded: state.model_loaded(),
    })
}

async fn predict(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> std::result::Result<Json<ScreeningReport>, ApiError> {
    // 先確認模型，再看請求內容
    let engine = state.engine.as_ref().ok_or(ScreeningError::ModelNotLoaded)?;

    let Json(body) = payload.map_err(|rejection| ScreeningError::InvalidRequest {
        message: rejection.body_text(),
    })?;

    let responses = extract_responses(&body)?;
    let report = engine.screen(&responses)?;

    Ok(Json(report))
}

/// Pulls the `responses` object out of the request body.
pub fn extract_responses(body: &Value) -> Result<QuestionnaireResponse> {
    // 頂層不是物件（陣列、字串、數字）時沒有 responses 可取，視為空請求
    let raw = body.get("responses").unwrap_or(&Value::Null);

    if is_empty_value(raw) {
        return Err(ScreeningError::InvalidRequest {
            message: "No responses provided".to_string(),
        });
    }

    match raw.as_object() {
        Some(map) => Ok(QuestionnaireResponse::from_map(map)),
        None => Err(ScreeningError::InvalidRequest {
            message: "responses must be an object mapping q1..q10 to answer labels".to_string(),
        }),
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = if origins.is_empty() || origins.iter().any(|origin| origin.trim() == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = origins
            .iter()
            .filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    };

    cors.allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
