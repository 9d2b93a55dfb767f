//! Camera API relay (v1)
//!
//! Accepts a caller's personal access token, forwards the matching GET to the
//! camera-management API, and hands back its status and JSON body unchanged.
//!
//! ```text
//!   caller                       relay                          upstream
//!   POST /login/      {token} ─▶ GET /v1/me/                 ─▶ api.angelcam.com
//!   POST /cameras/    {token} ─▶ GET /v1/shared-cameras/     ─▶
//!   POST /recordings/ {token, ─▶ GET /v1/shared-cameras/     ─▶
//!                      camId}        {camId}/recording/
//!                            ◀── status + body verbatim ◀──
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use camera_relay::config::{load_config, validate_config, ConfigError, RelayConfig};
use camera_relay::lifecycle::{wait_for_signal, Shutdown};
use camera_relay::observability::{logging, metrics};
use camera_relay::HttpServer;

#[derive(Parser)]
#[command(name = "camera-relay", version)]
#[command(about = "Relay for the camera-management API", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(long)]
    bind: Option<String>,

    /// Override upstream.base_url.
    #[arg(long)]
    upstream: Option<String>,
}

fn resolve_config(args: &Args) -> Result<RelayConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
    }
    if let Some(upstream) = &args.upstream {
        config.upstream.base_url = upstream.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    logging::init(&config.observability)?;

    tracing::info!("camera-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation already checked the address.
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
