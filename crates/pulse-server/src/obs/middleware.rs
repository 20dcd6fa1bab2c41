//! Request middlewares.
//!
//! [`track`] counts calls and measures handler latency for one statically
//! labelled endpoint. It does not inspect the response or catch failures of
//! the wrapped handler. [`log_requests`] emits one access-log event per
//! request.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    handler::Handler,
    middleware::{self, Next},
    response::Response,
    routing::{get, MethodRouter},
};

use crate::app_state::AppState;

/// Registry handle bound to one endpoint label.
#[derive(Clone)]
pub struct EndpointMetrics {
    state: AppState,
    endpoint: &'static str,
}

impl EndpointMetrics {
    pub fn new(state: AppState, endpoint: &'static str) -> Self {
        Self { state, endpoint }
    }

    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }
}

/// Count the call on both exporters, run the handler, observe its latency.
pub async fn track(State(m): State<EndpointMetrics>, req: Request, next: Next) -> Response {
    let prom = m.state.prom();
    prom.http_counter.with_label_values(&[m.endpoint]).inc();

    if let Some(counter) = m.state.counters().get_counter(m.endpoint) {
        counter.inc();
    }

    let start = Instant::now();
    let response = next.run(req).await;

    prom.http_histogram
        .with_label_values(&[m.endpoint])
        .observe(start.elapsed().as_secs_f64());

    response
}

/// `GET` route for `handler`, wrapped in [`track`] under `endpoint`.
pub fn instrumented<H, T>(state: &AppState, endpoint: &'static str, handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler).route_layer(middleware::from_fn_with_state(
        EndpointMetrics::new(state.clone(), endpoint),
        track,
    ))
}

/// Access log: method, path, status, latency.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_secs_f64() * 1000.0,
        "request"
    );
    response
}
