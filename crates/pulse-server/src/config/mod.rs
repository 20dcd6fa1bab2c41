//! Server config schema (strict parsing).
//!
//! The binary always runs on `ServerConfig::default()` (`0.0.0.0:8080`); no
//! file, environment variable, or flag is consulted. `load_from_str` parses
//! and validates an explicit document for embedders and tests.

pub mod schema;

use pulse_core::error::{Error, Result};

pub use schema::{ServerConfig, ServerSection};

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| Error::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
