//! Application state
//!
//! Everything here is fixed at startup and only read by handlers, so it
//! is shared behind a plain `Arc` without locks.

use std::fmt;

use vidbrowse_lib::{platform_roots, FixedRoots, PathResolver, RootProvider};

use crate::config::ServerConfig;
use crate::error::Result;

/// Application state shared across all handlers
pub struct AppState {
    /// Resolves request subpaths against the browse root
    pub resolver: PathResolver,

    /// Top-level roots for the index page
    pub roots: Box<dyn RootProvider>,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create a new AppState with the given configuration
    pub fn new(config: ServerConfig) -> Result<Self> {
        let resolver = match &config.browse.root {
            Some(root) => PathResolver::new(root.clone()),
            None => PathResolver::with_current_dir()?,
        };

        let roots: Box<dyn RootProvider> = if config.browse.roots.is_empty() {
            platform_roots(resolver.root().to_path_buf())
        } else {
            Box::new(FixedRoots::new(config.browse.roots.clone()))
        };

        Ok(Self {
            resolver,
            roots,
            config,
        })
    }

    /// Create AppState with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(ServerConfig::default())
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("resolver", &self.resolver)
            .field("roots", &self.roots.roots())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrowseConfig;
    use std::path::PathBuf;

    #[test]
    fn test_default_root_is_cwd() {
        let state = AppState::with_defaults().unwrap();
        assert_eq!(state.resolver.root(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_configured_roots() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            browse: BrowseConfig {
                root: Some(dir.path().to_path_buf()),
                roots: vec![PathBuf::from("/a"), PathBuf::from("/b")],
            },
            ..Default::default()
        };
        let state = AppState::new(config).unwrap();
        assert_eq!(state.resolver.root(), dir.path());
        assert_eq!(state.roots.roots().len(), 2);
    }
}
