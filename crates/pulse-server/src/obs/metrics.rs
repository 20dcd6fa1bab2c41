//! Prometheus registry for the API endpoints.
//!
//! Each `PromRegistry` owns its own `prometheus::Registry` rather than the
//! crate-global default one, so tests can build as many as they like. Label
//! children are created on first use; an endpoint never observed emits no
//! series.

use prometheus::core::Collector;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

use pulse_core::error::{Error, Result};

pub const REQUESTS_TOTAL: &str = "api_requests_total";
pub const REQUEST_DURATION: &str = "api_request_duration_seconds";

pub struct PromRegistry {
    registry: Registry,
    pub http_counter: IntCounterVec,
    pub http_histogram: HistogramVec,
}

impl PromRegistry {
    /// Build and register the endpoint families.
    ///
    /// Fails on any registration error; callers treat that as fatal.
    pub fn new() -> Result<Self> {
        let http_counter = IntCounterVec::new(
            Opts::new(REQUESTS_TOTAL, "Total number of API requests"),
            &["endpoint"],
        )
        .map_err(registration)?;

        let http_histogram = HistogramVec::new(
            HistogramOpts::new(REQUEST_DURATION, "Duration of API requests")
                .buckets(prometheus::DEFAULT_BUCKETS.to_vec()),
            &["endpoint"],
        )
        .map_err(registration)?;

        let prom = Self {
            registry: Registry::new(),
            http_counter,
            http_histogram,
        };
        prom.register(Box::new(prom.http_counter.clone()))?;
        prom.register(Box::new(prom.http_histogram.clone()))?;

        #[cfg(target_os = "linux")]
        prom.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(prom)
    }

    /// Register an additional collector.
    pub fn register(&self, collector: Box<dyn Collector>) -> Result<()> {
        self.registry.register(collector).map_err(registration)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render in Prometheus text exposition format.
    pub fn encode(&self) -> Result<String> {
        let families = self.registry.gather();
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(&families, &mut buf)
            .map_err(|e| Error::Internal(format!("metrics encode failed: {e}")))?;
        String::from_utf8(buf).map_err(|e| Error::Internal(format!("metrics not utf-8: {e}")))
    }
}

fn registration(e: prometheus::Error) -> Error {
    Error::Registration(e.to_string())
}
