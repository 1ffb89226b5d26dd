use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use orchestrator_api::{app, config, AppState};

#[derive(Parser, Debug)]
#[command(name = "orchestrator-api")]
#[command(about = "Container orchestrator API server")]
#[command(version)]
struct Args {
    #[arg(long, help = "Host to bind (default: ORCHESTRATOR_HOST or 0.0.0.0)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (default: ORCHESTRATOR_PORT, PORT or 5050)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET, APP_ENV, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = config::config().clone();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate().context("invalid configuration")?;

    tracing::info!("Starting orchestrator API in {:?} mode", config.environment);

    let app = app(AppState::new(&config));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
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
