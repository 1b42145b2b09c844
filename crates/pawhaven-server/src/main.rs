mod config;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use pawhaven_api::auth::{AppState, AppStateInner};
use pawhaven_api::password::Hasher;
use pawhaven_api::routes;
use pawhaven_db::Database;
use pawhaven_types::models::NewPet;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pawhaven=debug,pawhaven_api=debug,pawhaven_db=info,tower_http=debug".into()
            }),
        )
        .init();

    let config = Config::from_env()?;
    if config.has_placeholder_secret() {
        warn!("PAWHAVEN_SESSION_SECRET is unset or a placeholder; set a random value in production");
    }

    // Schema bootstrap happens here, before any request is accepted
    let db = Database::open(&config.db_path)?;
    if let Some(seed_file) = &config.seed_file {
        seed_pets(&db, seed_file)?;
    }

    let state: AppState = Arc::new(AppStateInner {
        db,
        hasher: Hasher::new(config.hash_cost)?,
    });

    let app = routes::app(routes::routes(), state, &config.session, &config.static_dir)
        .layer(TraceLayer::new_for_http());

    let addr = config.addr()?;
    info!("Pet adoption server listening on http://{}", addr);
    info!("Serving static files from {}", config.static_dir.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn seed_pets(db: &Database, path: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let pets: Vec<NewPet> = serde_json::from_str(&raw)
        .with_context(|| format!("Seed file {} is not a JSON list of pets", path.display()))?;

    db.seed_pets(&pets)?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
