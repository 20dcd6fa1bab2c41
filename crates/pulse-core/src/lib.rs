//! pulse core: the variable table, the counter registry, and the shared error type.
//!
//! This crate carries no HTTP or runtime dependencies. The server crate wires
//! these primitives into request handling, and tests can build isolated
//! instances without a listener.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Misuse such as an empty counter key is logged and surfaced as `None` or
//! `Error` instead of crashing the process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counters;
pub mod error;
pub mod vars;

/// Shared result type.
pub use error::{Error, Result};
pub use counters::CounterRegistry;
pub use vars::{Counter, FuncVar, IntVar, StringVar, Var, Vars};
