use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, AppState};
use service::{runtime, DocumentStore};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load configuration from `config.toml` (or `CONFIG_PATH`), falling back to env vars
pub fn load_config() -> anyhow::Result<AppConfig> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(error = %e, "config file unavailable; using environment");
            let mut cfg = AppConfig::from_env();
            cfg.normalize_and_validate()?;
            Ok(cfg)
        }
    }
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Build the document store and router described by `cfg`
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let log_path = cfg.store.log_path();
    runtime::ensure_env(&cfg.store.data_dir, &log_path).await?;

    let store = DocumentStore::new(&cfg.store.data_dir, log_path);
    let state = AppState { store: Arc::new(store), owner: cfg.store.owner.clone() };
    Ok(routes::build_router(state, build_cors()))
}

/// Build the app for an already loaded `cfg` and serve it until the listener fails.
///
/// Logging and `.env` handling belong to the caller.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, data_dir = %cfg.store.data_dir, "starting document store server");
    println!("server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
