//! Agent service endpoint.
//!
//! Exposes one agent's `submit_request` over HTTP so other agents can invoke
//! it as a tool. The wire contract is deliberately coarse: any validation or
//! loop failure maps to a bare `400` while the typed error is logged here,
//! so callers never see internal failure detail.

pub mod types;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::agent::Agent;

use types::{HealthResponse, WireRequest, WireResponse};

/// Shared service state.
///
/// The agent owns a single long-lived session, so concurrent requests are
/// serialized behind this mutex; interleaved loop runs would corrupt the
/// session's turn ordering.
pub struct AppState {
    agent: Mutex<Agent>,
}

/// Build the service router for one agent.
pub fn router(agent: Agent) -> Router {
    let state = Arc::new(AppState {
        agent: Mutex::new(agent),
    });

    Router::new()
        .route("/agent", post(submit_request).fallback(reject_method))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind a listener and serve the agent until the process exits.
pub async fn serve(agent: Agent, host: &str, port: u16) -> anyhow::Result<()> {
    let app = router(agent);
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("agent service listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// POST /agent - submit one input and run the dispatch loop to completion.
async fn submit_request(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !is_json_content(&headers) {
        tracing::warn!("rejecting request without JSON content type");
        return StatusCode::BAD_REQUEST.into_response();
    }

    let request: WireRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!("undecodable request body: {}", err);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let mut agent = state.agent.lock().await;
    match agent.submit_request(&request.input).await {
        Ok(content) => (StatusCode::OK, Json(WireResponse { content })).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "submit request failed");
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}

/// Any non-POST method on /agent.
async fn reject_method() -> StatusCode {
    StatusCode::BAD_REQUEST
}

/// GET /health - liveness probe.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().starts_with("application/json"))
        .unwrap_or(false)
}
