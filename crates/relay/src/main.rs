mod alert;
mod relay;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alert::ShellAlerter;
use relay::create_router;

/// Port the relay listens on unless overridden.
const DEFAULT_PORT: u16 = 8090;

/// Alert command prefix unless overridden.
const DEFAULT_ALERT_COMMAND: &str = "bash scripts/send_alert.sh";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = match std::env::var("ARRMATE_RELAY_PORT") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("Invalid ARRMATE_RELAY_PORT: {}", raw))?,
        Err(_) => DEFAULT_PORT,
    };
    let command = std::env::var("ARRMATE_ALERT_COMMAND")
        .unwrap_or_else(|_| DEFAULT_ALERT_COMMAND.to_string());

    info!(command = %command, "Using alert command");
    let alerter = Arc::new(ShellAlerter::new(command));
    let app = create_router(alerter);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting webhook relay on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
