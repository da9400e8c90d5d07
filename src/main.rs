use clap::Parser;
use knapsack::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, CATALOG_API_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("knapsack=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = knapsack::cli::run(cli).await {
        tracing::error!("fatal: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
