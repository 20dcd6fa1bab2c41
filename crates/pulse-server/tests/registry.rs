//! Registry construction and direct middleware tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use axum::{body::Body, http::Request, middleware, routing::get, Router};
use prometheus::{IntCounterVec, Opts};
use tower::ServiceExt;

use pulse_server::{
    app_state::AppState,
    config::ServerConfig,
    obs::{track, EndpointMetrics, PromRegistry},
};

#[test]
fn duplicate_registration_fails() {
    let prom = PromRegistry::new().unwrap();
    let dup = IntCounterVec::new(
        Opts::new("api_requests_total", "Total number of API requests"),
        &["endpoint"],
    )
    .unwrap();

    let err = prom.register(Box::new(dup)).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INTERNAL");
}

#[test]
fn registries_are_isolated() {
    let a = PromRegistry::new().unwrap();
    let b = PromRegistry::new().unwrap();
    a.http_counter.with_label_values(&["decide"]).inc();
    assert_eq!(b.http_counter.with_label_values(&["decide"]).get(), 0);
}

#[test]
fn concurrent_prometheus_increments() {
    const THREADS: u64 = 8;
    const PER_THREAD: u64 = 500;

    let prom = Arc::new(PromRegistry::new().unwrap());
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let prom = Arc::clone(&prom);
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    prom.http_counter.with_label_values(&["decide"]).inc();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(prom.http_counter.with_label_values(&["decide"]).get(), THREADS * PER_THREAD);
}

#[test]
fn sample_vars_are_published() {
    let state = AppState::new(ServerConfig::default()).unwrap();
    let names = state.vars().names();
    for n in ["cmdline", "counter", "name"] {
        assert!(names.iter().any(|x| x == n), "missing {n}");
    }
}

#[tokio::test]
async fn empty_label_still_serves_and_observes() {
    let state = AppState::new(ServerConfig::default()).unwrap();
    let metrics = EndpointMetrics::new(state.clone(), "");
    assert_eq!(metrics.endpoint(), "");

    let app: Router = Router::new()
        .route("/x", get(|| async { "x" }))
        .route_layer(middleware::from_fn_with_state(metrics, track));

    let res = app
        .oneshot(Request::builder().uri("/x").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(res.status().is_success());

    // No var-table counter for an empty label, but the Prometheus side still counts.
    assert!(state.counters().is_empty());
    assert_eq!(state.prom().http_counter.with_label_values(&[""]).get(), 1);
    assert_eq!(state.prom().http_histogram.with_label_values(&[""]).get_sample_count(), 1);
}
