//! Order Relay
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │Storefront│───▶│ Gateway  │───▶│  Render  │───▶│   SMTP   │
//! │  (JSON)  │    │(validate)│    │ (AR/RTL) │    │  relay   │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```
//!
//! Usage: `order_relay [--env <name>] [--port <port>]`

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::watch;

use order_relay::gateway::{self, state::AppState};
use order_relay::{AppConfig, KeepAliveProber, OrderService, SmtpMailTransport};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut app_config =
        AppConfig::load(&env).with_context(|| format!("loading configuration for {}", env))?;
    if let Some(port) = get_port_override() {
        app_config.gateway.port = port;
    }

    let _log_guard = order_relay::logging::init_logging(&app_config);
    tracing::info!("Starting order relay in {} mode", env);

    if let Err(e) = app_config.validate() {
        tracing::error!("❌ FATAL: invalid configuration: {}", e);
        return Err(e).context("validating configuration");
    }

    let transport = SmtpMailTransport::new(&app_config.mail).context("building SMTP transport")?;
    tracing::info!(
        "SMTP relay: {}:{} as {}",
        app_config.mail.smtp_host,
        app_config.mail.smtp_port,
        app_config.mail.smtp_username
    );

    let orders = Arc::new(OrderService::new(
        Arc::new(transport),
        app_config.mail.clone(),
        app_config.shop.clone(),
    ));
    let state = Arc::new(AppState::new(orders, app_config.shop.name.clone()));

    // Keep-alive runs beside the server and stops with it.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let prober = if app_config.keep_alive.enabled {
        let url = app_config.keep_alive_url()?;
        let interval = Duration::from_secs(app_config.keep_alive.interval_secs);
        let prober = KeepAliveProber::new(url, interval).context("building keep-alive client")?;
        Some(prober.spawn(shutdown_rx))
    } else {
        tracing::info!("Keep-alive prober disabled");
        None
    };

    let addr = format!("{}:{}", app_config.gateway.host, app_config.gateway.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ FATAL: Failed to bind to {}: {}", addr, e);
            return Err(e).with_context(|| format!("binding {}", addr));
        }
    };

    let served = gateway::run_server(listener, state, gateway::shutdown_signal()).await;

    let _ = shutdown_tx.send(true);
    if let Some(handle) = prober {
        if let Err(e) = handle.await {
            tracing::warn!("Keep-alive task ended abnormally: {}", e);
        }
    }

    served.context("serving HTTP")?;
    tracing::info!("Order relay stopped");
    Ok(())
}
