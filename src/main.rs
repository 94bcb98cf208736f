//! Process entry point.
//!
//! Startup order: load configuration, initialize tracing, bind the listener,
//! compile the route table, serve until shutdown. A configuration error at
//! any of these steps aborts startup; there is no recovery path, since a
//! misconfigured route table is a deployment-time defect.

use std::path::Path;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use site_router::config::{self, AppConfig};
use site_router::{HttpServer, Shutdown};

/// Environment variable naming the configuration file. There are no CLI flags.
const CONFIG_ENV: &str = "SITE_ROUTER_CONFIG";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| "config.toml".to_string());
    let config_file_present = Path::new(&config_path).exists();
    let config = if config_file_present {
        config::load_config(Path::new(&config_path))?
    } else {
        AppConfig::default()
    };

    init_tracing(&config);

    if config_file_present {
        tracing::info!(path = %config_path, "Configuration loaded");
    } else {
        tracing::info!(path = %config_path, "No configuration file found, using defaults");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        debug = config.debug,
        upstream = %config.devserver.upstream_url,
        "Starting site-router"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.install_signal_handler();

    let server = HttpServer::new(&config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let default_filter = format!(
        "site_router={level},tower_http={level}",
        level = config.observability.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
