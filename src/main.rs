// prompt2image - Resilient image-generation gateway

use anyhow::Result;
use clap::Parser;
use prompt2image::cli::Args;
use prompt2image::config::AppConfig;
use prompt2image::generation::GenerationService;
use prompt2image::openai::OpenAiClient;
use prompt2image::server::create_router;
use prompt2image::utils::clock::SystemClock;
use prompt2image::utils::logging;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load()?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting prompt2image v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build upstream client
    let client = OpenAiClient::new(&config.openai, &config.performance)?;
    if config.openai.api_key.is_empty() {
        warn!("No upstream API key configured; generation requests will fail until OPENAI_API_KEY is set");
    }

    // Phase 3.5: Handle --check flag (connectivity probe)
    if args.check {
        let latency = client.check_connectivity().await?;
        info!("Upstream API reachable in {:?}", latency);
        return Ok(());
    }

    // Phase 4: Assemble the generation service
    let generation = Arc::new(GenerationService::new(
        config.generation.clone(),
        Arc::new(client),
        Arc::new(SystemClock),
    ));

    // Phase 5: Build and start HTTP server
    let app = create_router(config.clone(), generation)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
