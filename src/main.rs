//! Video Browser
//!
//! A local web server for browsing a folder tree and playing the video
//! files found in it straight in the browser.

#![allow(dead_code)]

mod config;
mod config_file;
mod error;
mod http;
mod state;

use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::http::create_router;
use crate::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "vidbrowse";

#[derive(Parser, Debug, Clone)]
#[command(name = "vidbrowse")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file, used if it exists
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Host address to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Folder to browse when no path is given (default: working directory)
    #[arg(short, long)]
    root: Option<PathBuf>,
}

impl Args {
    /// Command line values override the configuration file.
    fn apply(&self, config: &mut ServerConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(root) = &self.root {
            config.browse.root = Some(root.clone());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration before logging starts, so the configured level applies.
    let (mut config, load_error) = load_config(&args.config);
    args.apply(&mut config);

    init_logging(&config);

    tracing::info!("{} v{} starting", APP_NAME, VERSION);
    if let Some(e) = load_error {
        tracing::warn!(
            "Failed to load config file {}: {}. Using defaults.",
            args.config.display(),
            e
        );
    }
    tracing::info!("Configuration loaded: {:?}", config);

    let extensions = vidbrowse_lib::init_extensions();
    tracing::info!("Serving video files with extensions {}", extensions);

    // Create application state
    let state = Arc::new(AppState::new(config.clone())?);
    tracing::info!("Browse root: {}", state.resolver.root().display());

    // Build router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = config
        .socket_addr()
        .parse()
        .map_err(|e| ServerError::Config(format!("invalid address {}: {}", config.socket_addr(), e)))?;
    tracing::info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Read the config file if there is one. A broken file falls back to the
/// defaults; the error is returned so it can be logged once logging is up.
fn load_config(path: &Path) -> (ServerConfig, Option<ServerError>) {
    if !path.exists() {
        return (ServerConfig::default(), None);
    }
    match crate::config_file::ConfigFile::from_file(path) {
        Ok(cf) => (cf.into_server_config(), None),
        Err(e) => (ServerConfig::default(), Some(e)),
    }
}

/// Initialize logging with tracing
fn init_logging(config: &ServerConfig) {
    let json = config.json_logs();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}
