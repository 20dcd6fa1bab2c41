//! pulse server library entry.
//!
//! Wires the variable table, the Prometheus registry, and the per-endpoint
//! instrumentation middleware into an axum router. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod handlers;
pub mod obs;
pub mod ops;
pub mod router;
