//! HTTP surface
//!
//! - `GET /`         health check
//! - `POST /analyze` run the pipeline on `{"text": "..."}`
//! - `GET /history`  most recent analyses, newest first
//!
//! All routes allow any origin so a browser front end served from another
//! port can call them.

use crate::pipeline::{AnalyzeRequest, Pipeline, PipelineError};
use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        match self {
            PipelineError::Validation(e) => error_body(StatusCode::BAD_REQUEST, e.to_string()),
            other => {
                error!(error = %other, "request failed");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

/// Build the application router around a shared pipeline.
pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/analyze", post(analyze))
        .route("/history", get(history))
        .layer(middleware::from_fn(allow_any_origin))
        .with_state(AppState { pipeline })
}

/// Serve until the listener fails or the task is dropped.
pub async fn serve(listener: TcpListener, pipeline: Arc<Pipeline>) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "listening");
    }
    axum::serve(listener, router(pipeline).into_make_service()).await
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "Backend is running!" }))
}

async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Response, PipelineError> {
    // Unparseable or non-JSON bodies are treated like a body without `text`
    let text = body.ok().and_then(|Json(req)| req.text);
    let analysis = state.pipeline.handle(text.as_deref()).await?;
    Ok(Json(analysis).into_response())
}

async fn history(State(state): State<AppState>) -> Result<Response, PipelineError> {
    let records = state.pipeline.history().await?;
    Ok(Json(records).into_response())
}

async fn allow_any_origin(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}
