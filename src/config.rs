//! Server configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Browsing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Folder an empty subpath resolves to. Defaults to the working directory.
    pub root: Option<PathBuf>,

    /// Fixed top-level roots shown on the index page. When empty the
    /// platform decides (drive letters on Windows, the root elsewhere).
    pub roots: Vec<PathBuf>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Browsing configuration
    pub browse: BrowseConfig,

    /// Enable CORS
    pub cors_enabled: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log output format (pretty, json)
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            browse: BrowseConfig::default(),
            cors_enabled: true,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Logging filter used when `RUST_LOG` is not set
    pub fn log_filter(&self) -> String {
        format!(
            "vidbrowse={lvl},vidbrowse_lib={lvl},tower_http={lvl}",
            lvl = self.log_level
        )
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
