//! Axum router wiring.
//!
//! `/decide` and `/activate` are wrapped in the endpoint instrumentation;
//! every route goes through the request logger.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, handlers, obs, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::hello))
        .route("/healthz", get(ops::healthz))
        .route("/debug/vars", get(ops::debug_vars))
        .route("/metrics", get(ops::metrics))
        .route("/decide", obs::instrumented(&state, "decide", handlers::decide))
        .route("/activate", obs::instrumented(&state, "activate", handlers::activate))
        .layer(middleware::from_fn(obs::log_requests))
        .with_state(state)
}
