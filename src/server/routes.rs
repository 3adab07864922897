//! HTTP routes for the enrichment gateway.
//!
//! One lookup route plus a liveness probe. Every outcome maps to an
//! HTTP status and a JSON body; no error propagates as an unhandled
//! fault. Non-GET methods on the lookup route get a JSON 405 rather
//! than axum's default empty body.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::error;

use crate::gateway::EnrichmentGateway;
use crate::types::RawQuery;
use crate::TailfinError;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<EnrichmentGateway>,
    /// Include error detail in response bodies. Off in production.
    pub expose_error_details: bool,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/airlabs/flight",
            get(lookup_flight).fallback(method_not_allowed),
        )
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Structured JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

async fn healthz() -> &'static str {
    "ok"
}

async fn lookup_flight(
    State(state): State<AppState>,
    Query(raw): Query<RawQuery>,
) -> Response {
    match state.gateway.lookup(raw).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => error_response(err, state.expose_error_details),
    }
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            error: "Method not allowed",
            details: None,
        }),
    )
        .into_response()
}

/// Map a gateway error to an HTTP status and JSON body.
fn error_response(err: TailfinError, expose_details: bool) -> Response {
    let (status, label) = match &err {
        TailfinError::InvalidQuery(_) => (StatusCode::BAD_REQUEST, "Invalid query"),
        TailfinError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded"),
        TailfinError::Http(_) | TailfinError::Upstream { .. } => {
            (StatusCode::BAD_GATEWAY, "Upstream lookup failed")
        }
        TailfinError::Configuration(_) => {
            error!(error = %err, "unexpected failure handling lookup");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    };

    // Validation detail is the caller's own input reflected back and is
    // always safe to show. Everything else is gated.
    let details = match &err {
        TailfinError::InvalidQuery(msg) => Some(msg.clone()),
        _ if expose_details => Some(err.to_string()),
        _ => None,
    };

    (status, Json(ErrorBody { error: label, details })).into_response()
}
