//! Shared application state for the pulse server.
//!
//! Built once at startup and handed to the router. Holds the Prometheus
//! registry, the variable table, and the counter registry exporting into it.

use std::sync::Arc;

use pulse_core::error::Result;
use pulse_core::{CounterRegistry, Vars};

use crate::config::ServerConfig;
use crate::obs::PromRegistry;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    prom: PromRegistry,
    counters: CounterRegistry,
}

impl AppState {
    /// Build application state.
    /// Returns Result so a registration failure reaches main before serving.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        let prom = PromRegistry::new()?;

        let vars = Arc::new(Vars::with_defaults());

        // Sample vars, always present in the dump.
        let counter = vars.new_int("counter")?;
        counter.add(1);
        let name = vars.new_string("name")?;
        name.set("value");

        let counters = CounterRegistry::new(vars);

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, prom, counters }),
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn prom(&self) -> &PromRegistry {
        &self.inner.prom
    }

    pub fn counters(&self) -> &CounterRegistry {
        &self.inner.counters
    }

    pub fn vars(&self) -> &Vars {
        self.inner.counters.vars()
    }
}
