use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use menu_api::config::{AppConfig, StoreBackend};
use menu_api::{app, build_store, AppState};

#[derive(Parser)]
#[command(name = "menu-api")]
#[command(about = "Menu API server")]
#[command(version)]
struct ServerArgs {
    #[arg(long, help = "Port to listen on (overrides MENU_API_PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Document store backend: memory or postgres (overrides DATABASE_BACKEND)")]
    store: Option<StoreBackend>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL and JWT_SECRET are picked up
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = ServerArgs::parse();
    let mut config = AppConfig::from_env();
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if let Some(store) = args.store {
        config.database.backend = store;
    }
    config.validate().context("invalid configuration")?;

    tracing::info!("Starting Menu API in {:?} mode", config.environment);
    if let Some(url) = config.redacted_database_url() {
        tracing::info!("Database: {}", url);
    }

    let store = build_store(&config).await.context("failed to open document store")?;
    let state = AppState::new(store, &config).context("failed to build application state")?;
    let router = app(state, &config);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Menu API listening on http://{}", bind_addr);
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
