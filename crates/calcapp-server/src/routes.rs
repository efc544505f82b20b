use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use calcapp_core::{BoundaryResponse, EvaluateService};
use tracing::{info_span, Instrument};

#[derive(Clone)]
pub struct AppState {
    service: Arc<EvaluateService>,
}

pub fn router(service: EvaluateService) -> Router {
    let state = AppState {
        service: Arc::new(service),
    };

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/evaluate", post(evaluate))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Takes the raw body so that undecodable JSON gets the same 400 shape as
/// every other validation failure.
async fn evaluate(State(state): State<AppState>, body: Bytes) -> Response {
    let span = info_span!(
        "api.evaluate",
        status = tracing::field::Empty,
        latency_ms = tracing::field::Empty,
    );

    async move {
        let started = Instant::now();
        let response = state.service.handle_body(&body).await;

        let span = tracing::Span::current();
        span.record("status", response.status);
        span.record("latency_ms", started.elapsed().as_millis() as u64);

        into_http(response)
    }
    .instrument(span)
    .await
}

fn into_http(response: BoundaryResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body)).into_response()
}
