//! sharecast-signal: WebSocket signaling server for screen sharing.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use sharecast_common::Result;
use sharecast_signal::{serve, LifecycleCoordinator};
use tokio::net::TcpListener;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Filter in effect until the config file has been read.
const BOOTSTRAP_FILTER: &str = "sharecast_signal=info,sharecast_config=info";

type FilterHandle = reload::Handle<EnvFilter, Registry>;

#[derive(Parser)]
#[command(
    name = "sharecast-signal",
    about = "WebSocket signaling coordinator for screen sharing"
)]
struct Args {
    /// Path to a TOML config file. Defaults to the platform config directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind, overriding `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overriding `server.port`.
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

/// `RUST_LOG` wins when set; otherwise `fallback` applies.
fn env_or(fallback: &str) -> (EnvFilter, bool) {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(fallback), false),
    }
}

/// Swap in `logging.filter` from the config, unless `RUST_LOG` was given.
fn apply_config_filter(handle: &FilterHandle, filter: &str, from_env: bool) -> bool {
    if from_env {
        return false;
    }
    match handle.reload(EnvFilter::new(filter)) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "could not apply logging.filter");
            false
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let (filter, from_env) = env_or(BOOTSTRAP_FILTER);
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => sharecast_config::load_config_from(path)?,
        None => sharecast_config::load_config()?,
    };
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if args.print_config {
        println!("{}", sharecast_config::config_to_json(&config));
        return Ok(());
    }

    apply_config_filter(&handle, &config.logging.filter, from_env);

    let coordinator = Arc::new(LifecycleCoordinator::from_config(&config));
    let listener = TcpListener::bind(config.server.bind_addr()).await?;

    serve(listener, coordinator, config.server.outbound_buffer).await;
    Ok(())
}
