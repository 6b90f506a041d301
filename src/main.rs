//! Docgraph server: loads configuration, builds the engine and serves the HTTP API.

use anyhow::Context;
use clap::Parser;
use docgraph::{Config, HttpServer, SearchEngine};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "docgraph", version, about = "Document relationship graph server")]
struct Cli {
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind address (overrides the config file)
    #[arg(long)]
    address: Option<String>,

    /// Port (overrides the config file)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(address) = cli.address {
        config.server.address = address;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    info!("Docgraph v{}", docgraph::version());

    let engine = SearchEngine::from_config(&config).context("failed to build engine")?;
    let server = HttpServer::new(engine, config.server.address.clone(), config.server.port);
    server.start().await.context("server error")?;

    Ok(())
}
