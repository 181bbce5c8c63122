//! Namesake server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) layered with
//! `NAMESAKE_*` environment variables, opens the SQLite store, and serves the
//! person API over HTTP.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use namesake_enrich::{Enricher, PredictionClient};
use namesake_server::{AppState, ServerConfig};
use namesake_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Namesake person enrichment server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
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

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("NAMESAKE").try_parsing(true))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store = open_store(&server_cfg).await?;

  let client = PredictionClient::new(server_cfg.endpoints(), server_cfg.request_timeout())
    .context("failed to build prediction client")?;

  let state = AppState {
    store:    Arc::new(store),
    enricher: Enricher::new(client),
  };

  let app = namesake_server::router(state).layer(TraceLayer::new_for_http());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Open the store, retrying a bounded number of times before giving up.
async fn open_store(cfg: &ServerConfig) -> anyhow::Result<SqliteStore> {
  let path     = expand_tilde(&cfg.store_path);
  let attempts = cfg.store_open_attempts.max(1);

  let mut attempt = 1;
  loop {
    match SqliteStore::open(&path).await {
      Ok(store) => {
        tracing::info!(path = %path.display(), "opened store");
        return Ok(store);
      }
      Err(error) if attempt < attempts => {
        tracing::warn!(attempt, %error, "failed to open store; retrying");
        tokio::time::sleep(cfg.store_retry_delay()).await;
        attempt += 1;
      }
      Err(error) => {
        return Err(error).with_context(|| {
          format!("failed to open store at {path:?} after {attempts} attempts")
        });
      }
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
