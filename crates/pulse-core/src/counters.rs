//! Label-keyed counter registry exported through a [`Vars`] table.
//!
//! Each endpoint label maps to exactly one [`Counter`], published in the
//! variable table as `counter.<label>`. Lookups of existing counters take a
//! shard read lock only; creation is a single insert-if-absent, so callers
//! racing on a new label all observe the same instance.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::vars::{Counter, Vars};

/// Namespace prefix separating counters from other var kinds.
const COUNTER_PREFIX: &str = "counter";

pub struct CounterRegistry {
    vars: Arc<Vars>,
    counters: DashMap<String, Counter>,
}

impl CounterRegistry {
    pub fn new(vars: Arc<Vars>) -> Self {
        Self {
            vars,
            counters: DashMap::new(),
        }
    }

    /// Get or create the counter for `key`.
    ///
    /// Returns `None` (and logs) for an empty key, or when the exported name
    /// is already taken by a var of another kind.
    pub fn get_counter(&self, key: &str) -> Option<Counter> {
        if key.is_empty() {
            tracing::warn!("metrics counter key is empty");
            return None;
        }

        let combined = format!("{COUNTER_PREFIX}.{key}");

        if let Some(c) = self.counters.get(&combined) {
            return Some(c.value().clone());
        }

        match self.counters.entry(combined) {
            Entry::Occupied(e) => Some(e.get().clone()),
            Entry::Vacant(slot) => match self.vars.get_or_publish_counter(slot.key()) {
                Ok(c) => {
                    tracing::debug!(name = %slot.key(), "counter created");
                    slot.insert(c.clone());
                    Some(c)
                }
                Err(e) => {
                    tracing::warn!(name = %slot.key(), error = %e, "counter export failed");
                    None
                }
            },
        }
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Sorted exported names (`counter.<label>`).
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.counters.iter().map(|r| r.key().clone()).collect();
        keys.sort();
        keys
    }

    pub fn vars(&self) -> &Arc<Vars> {
        &self.vars
    }
}
