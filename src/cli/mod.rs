use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use crate::config::{self, AppConfig};
use crate::database::{DatabaseManager, MemoryStore, PgStore, Store};
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "knapsack")]
#[command(about = "Knapsack - book collection API server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP API (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides PORT)")]
        port: Option<u16>,

        #[arg(long, help = "Keep all data in process memory instead of PostgreSQL")]
        memory: bool,
    },

    #[command(about = "Create missing database tables and exit")]
    Migrate,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::config().clone();

    match cli.command.unwrap_or(Commands::Serve {
        port: None,
        memory: false,
    }) {
        Commands::Serve { port, memory } => serve(config, port, memory).await,
        Commands::Migrate => migrate(&config).await,
    }
}

async fn migrate(config: &AppConfig) -> anyhow::Result<()> {
    let store = PgStore::new(DatabaseManager::connect(&config.database).await?);
    store
        .sync_schema()
        .await
        .context("schema synchronization failed")?;
    store.close().await;
    Ok(())
}

async fn serve(mut config: AppConfig, port: Option<u16>, memory: bool) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    let store: Arc<dyn Store> = if memory {
        tracing::warn!("using in-memory storage; data is lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(PgStore::new(DatabaseManager::connect(&config.database).await?))
    };

    // Nothing can be served correctly without the schema.
    store
        .sync_schema()
        .await
        .context("schema synchronization failed")?;

    tracing::info!(environment = ?config.environment, "starting knapsack");
    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::new(store, config).context("invalid catalog configuration")?;
    let app = crate::app(state, tower_sessions::MemoryStore::default());

    let listener = TcpListener::bind(bind_addr.as_str())
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
