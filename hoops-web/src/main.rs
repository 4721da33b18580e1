use std::sync::Arc;

use anyhow::{Context, Result};
use hoops_client::ApiClient;
use hoops_web::api;
use hoops_web::config::Config;
use hoops_web::report::{ErrorReporter, TracingReporter};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hoops_web=debug,hoops_client=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hoops front-end...");

    let config = load_config()?;
    info!(
        "Loaded configuration: api_url={}, timeout={:?}",
        config.api_url, config.api_timeout
    );

    let http = reqwest::Client::builder()
        .timeout(config.api_timeout)
        .build()
        .context("Failed to build HTTP client")?;
    let client = ApiClient::with_client(config.api_url.clone(), http);

    let shutdown = CancellationToken::new();
    let reporter: Arc<dyn ErrorReporter> = Arc::new(TracingReporter::new());

    // Build router with all entity controllers
    let app = api::create_router(&client, reporter, shutdown.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("Failed to start server")?;

    info!("Server stopped");
    Ok(())
}

/// Loads configuration from environment variables over the defaults
fn load_config() -> Result<Config> {
    let config = Config::from_env().context("Invalid configuration")?;
    config.validate()?;
    Ok(config)
}

/// Waits for Ctrl-C, then cancels every in-flight outbound call
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    info!("Shutdown requested");
    shutdown.cancel();
}
