use std::net::SocketAddr;

use serde::Deserialize;
use pulse_core::error::{Error, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(Error::Config(format!("unsupported config version {}", self.version)));
        }

        self.server.listen_addr()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|e| Error::Config(format!("server.listen {:?}: {e}", self.listen)))
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
