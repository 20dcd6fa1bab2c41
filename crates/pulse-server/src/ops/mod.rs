//! Operational HTTP endpoints.
//!
//! - `/healthz`    : liveness
//! - `/debug/vars` : variable table as JSON
//! - `/metrics`    : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;
use crate::error::ApiError;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn debug_vars(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        state.vars().render().to_string(),
    )
}

pub async fn metrics(State(state): State<AppState>) -> Result<Response, ApiError> {
    let body = state.prom().encode()?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response())
}
