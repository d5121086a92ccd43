//! brewstat server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `BREWSTAT_*`
//! environment variables, opens the record store and report cache, and serves
//! the JSON report API over HTTP.

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use brewstat_core::{cache::MemoryCache, report::ReportService, store::CacheStore};
use brewstat_store_sqlite::{SqliteCache, SqliteStore};
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "brewstat report server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Drop every cached report before serving, regardless of configuration.
  #[arg(long)]
  flush_cache: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config).context("failed to load configuration")?;

  // Open the raw record store.
  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.store_path))?;

  let flush = cli.flush_cache || server_cfg.flush_cache_on_startup;

  match &server_cfg.cache_path {
    Some(path) => {
      let cache = SqliteCache::open(path)
        .await
        .with_context(|| format!("failed to open cache at {path:?}"))?;
      tracing::info!(path = ?path, "using sqlite report cache");
      serve(&server_cfg, store, cache, flush).await
    }
    None => {
      tracing::info!("using in-memory report cache");
      serve(&server_cfg, store, MemoryCache::new(), flush).await
    }
  }
}

async fn serve<C>(
  server_cfg: &ServerConfig,
  store:      SqliteStore,
  cache:      C,
  flush:      bool,
) -> anyhow::Result<()>
where
  C: CacheStore + 'static,
{
  let service = Arc::new(ReportService::new(store, cache).with_ttl(server_cfg.cache_ttl()));

  if flush {
    service
      .flush_cache()
      .await
      .context("failed to flush report cache")?;
  }

  let app = brewstat_api::api_router(service).layer(TraceLayer::new_for_http());
  let address = server_cfg.address();

  tracing::info!(ttl_secs = server_cfg.cache_ttl_secs, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
