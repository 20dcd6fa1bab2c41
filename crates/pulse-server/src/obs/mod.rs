//! Observability: the Prometheus registry plus the request middlewares.
//!
//! Per-endpoint counters are exported twice: as `api_requests_total` through
//! the Prometheus registry and as `counter.<endpoint>` through the variable
//! table served at `/debug/vars`.

pub mod metrics;
pub mod middleware;

pub use metrics::PromRegistry;
pub use middleware::{instrumented, log_requests, track, EndpointMetrics};
