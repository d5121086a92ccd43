//! Runtime configuration, layered from an optional TOML file and `BREWSTAT_*`
//! environment variables (environment wins).

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                   String,
  #[serde(default = "default_port")]
  pub port:                   u16,
  /// SQLite file holding the `beers` and `breweries` collections.
  pub store_path:             PathBuf,
  /// SQLite file for cached reports. Without one, reports are cached in
  /// process memory and lost on restart.
  #[serde(default)]
  pub cache_path:             Option<PathBuf>,
  #[serde(default = "default_cache_ttl_secs")]
  pub cache_ttl_secs:         u64,
  /// Drop every cached report before serving.
  #[serde(default)]
  pub flush_cache_on_startup: bool,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_cache_ttl_secs() -> u64 { brewstat_core::report::DEFAULT_TTL.as_secs() }

impl ServerConfig {
  /// Load from `path` (if it exists) overlaid with the process environment.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::from_builder(
      Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(Environment::with_prefix("BREWSTAT")),
    )
  }

  fn from_builder(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
  ) -> Result<Self, ConfigError> {
    builder.build()?.try_deserialize()
  }

  pub fn cache_ttl(&self) -> Duration { Duration::from_secs(self.cache_ttl_secs) }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}
