//! Update Relay - Telegram webhook relay server.
//!
//! This binary:
//! - Receives Telegram updates on the webhook path
//! - Acknowledges warmup pings without waking the downstream handler
//! - Answers pre-checkout queries directly within Telegram's deadline
//! - Forwards all other updates and mirrors the downstream response

use std::net::SocketAddr;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use relay::{build_router, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("relay_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        webhook_path = %config.webhook_path,
        bot_token_configured = config.bot_token.is_some(),
        secret_token_configured = config.webhook_secret_token.is_some(),
        telegram_api_base = %config.telegram_api_base,
        downstream_url = %config.downstream_url,
        invoice_payload_prefix = %config.invoice_payload_prefix,
        "config_loaded"
    );

    let http = Client::builder()
        .pool_max_idle_per_host(100)
        .build()
        .context("Failed to create HTTP client")?;

    let port = config.port;
    let app = build_router(AppState::from_config(config, http));

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "relay_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("relay_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    };

    info!(signal = received, "relay_shutting_down");
}
