//! Process variable table.
//!
//! Named runtime values (integers, strings, counters, computed values) are
//! published once under a unique name and rendered together as one JSON
//! object. The table is backed by `DashMap`, so publishing and lookups from
//! concurrent request tasks need no outer lock. Values use atomics; the only
//! locked value is `StringVar`.

use std::fmt;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Monotonic unsigned counter. Clones share the same cell.
#[derive(Debug, Clone, Default)]
pub struct Counter(Arc<AtomicU64>);

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment by 1.
    pub fn inc(&self) {
        self.add(1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, v: u64) {
        self.0.fetch_add(v, Ordering::Relaxed);
    }

    pub fn value(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    /// True when both handles point at the same cell.
    pub fn same_as(&self, other: &Counter) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Signed integer var.
#[derive(Debug, Clone, Default)]
pub struct IntVar(Arc<AtomicI64>);

impl IntVar {
    pub fn add(&self, v: i64) {
        self.0.fetch_add(v, Ordering::Relaxed);
    }

    pub fn set(&self, v: i64) {
        self.0.store(v, Ordering::Relaxed);
    }

    pub fn value(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// String var.
#[derive(Debug, Clone, Default)]
pub struct StringVar(Arc<RwLock<String>>);

impl StringVar {
    pub fn set(&self, v: impl Into<String>) {
        let mut guard = self.0.write().unwrap_or_else(|e| e.into_inner());
        *guard = v.into();
    }

    pub fn value(&self) -> String {
        self.0.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Var whose value is computed at render time.
#[derive(Clone)]
pub struct FuncVar(Arc<dyn Fn() -> Value + Send + Sync>);

impl FuncVar {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn value(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for FuncVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FuncVar")
    }
}

/// A published entry of the table.
#[derive(Debug, Clone)]
pub enum Var {
    Int(IntVar),
    Str(StringVar),
    Counter(Counter),
    Func(FuncVar),
}

impl Var {
    pub fn to_json(&self) -> Value {
        match self {
            Var::Int(v) => Value::from(v.value()),
            Var::Str(v) => Value::from(v.value()),
            Var::Counter(c) => Value::from(c.value()),
            Var::Func(f) => f.value(),
        }
    }
}

/// Name -> var table. Names are unique for the lifetime of the table.
#[derive(Debug, Default)]
pub struct Vars {
    map: DashMap<String, Var>,
}

impl Vars {
    pub fn new() -> Self {
        Self { map: DashMap::new() }
    }

    /// Table pre-populated with `cmdline` (process argv).
    pub fn with_defaults() -> Self {
        let vars = Self::new();
        vars.map.insert(
            "cmdline".to_string(),
            Var::Func(FuncVar::new(|| {
                Value::from(std::env::args().collect::<Vec<_>>())
            })),
        );
        vars
    }

    /// Publish a var under a unique name.
    pub fn publish(&self, name: &str, var: Var) -> Result<()> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        match self.map.entry(name.to_string()) {
            Entry::Occupied(_) => Err(Error::DuplicateVar(name.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(var);
                Ok(())
            }
        }
    }

    pub fn new_int(&self, name: &str) -> Result<IntVar> {
        let v = IntVar::default();
        self.publish(name, Var::Int(v.clone()))?;
        Ok(v)
    }

    pub fn new_string(&self, name: &str) -> Result<StringVar> {
        let v = StringVar::default();
        self.publish(name, Var::Str(v.clone()))?;
        Ok(v)
    }

    pub fn new_counter(&self, name: &str) -> Result<Counter> {
        let c = Counter::new();
        self.publish(name, Var::Counter(c.clone()))?;
        Ok(c)
    }

    /// Insert-if-absent for counters. Racing callers all get the winner's handle.
    pub fn get_or_publish_counter(&self, name: &str) -> Result<Counter> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if let Some(existing) = self.map.get(name) {
            return as_counter(name, existing.value());
        }
        let entry = self
            .map
            .entry(name.to_string())
            .or_insert_with(|| Var::Counter(Counter::new()));
        as_counter(name, entry.value())
    }

    pub fn get(&self, name: &str) -> Option<Var> {
        self.map.get(name).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Sorted var names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    /// Render all vars as one JSON object with sorted keys.
    pub fn render(&self) -> Value {
        // Snapshot first: computed vars must not run under a shard lock.
        let mut snapshot: Vec<(String, Var)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        snapshot.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = Map::new();
        for (name, var) in snapshot {
            out.insert(name, var.to_json());
        }
        Value::Object(out)
    }
}

fn as_counter(name: &str, var: &Var) -> Result<Counter> {
    match var {
        Var::Counter(c) => Ok(c.clone()),
        _ => Err(Error::KindMismatch(name.to_string())),
    }
}
