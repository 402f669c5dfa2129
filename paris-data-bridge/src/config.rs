//! Application configuration.
//!
//! Layered, lowest precedence first:
//! 1. built-in defaults
//! 2. a TOML file (`paris-data.toml` in the working directory, or an
//!    explicit path)
//! 3. environment variables prefixed `PARIS_DATA_`, with `__` between
//!    nested keys (e.g. `PARIS_DATA_BUS__HOST=broker.local`)

use std::net::SocketAddr;
use std::path::Path;

use ::config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::bus::BusConfig;
use crate::ratp::RatpConfig;

/// Config file looked up when no explicit path is given.
const DEFAULT_CONFIG_FILE: &str = "paris-data";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "PARIS_DATA";

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Socket address to bind.
    pub fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// Everything both binaries need.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ratp: RatpConfig,
    pub bus: BusConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// With `path`, that file must exist. Without it, `paris-data.toml`
    /// is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        ::config::Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
