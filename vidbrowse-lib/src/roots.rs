//! Top-level browse roots
//!
//! Where browsing starts depends on the platform: Windows has a set of
//! drive letters, elsewhere we start in the working directory. Callers
//! only see `RootProvider::roots`.

use std::path::PathBuf;

use serde::Serialize;

use crate::path::normalize_separators;

/// A navigable starting point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Root {
    /// Label shown to the user
    pub name: String,
    /// Subpath to browse, not yet percent-encoded. Empty means the
    /// resolver's default root.
    pub subpath: String,
}

/// Enumerates the top-level roots.
pub trait RootProvider: Send + Sync {
    fn roots(&self) -> Vec<Root>;
}

/// A fixed set of roots, such as drive letters or configured folders.
#[derive(Debug, Clone)]
pub struct FixedRoots(Vec<PathBuf>);

impl FixedRoots {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self(roots)
    }
}

impl RootProvider for FixedRoots {
    fn roots(&self) -> Vec<Root> {
        self.0
            .iter()
            .map(|p| {
                let display = p.display().to_string();
                Root {
                    subpath: normalize_separators(&display),
                    name: display,
                }
            })
            .collect()
    }
}

/// The default browse root as the only root.
#[derive(Debug, Clone)]
pub struct SingleWorkingDirectoryRoot(PathBuf);

impl SingleWorkingDirectoryRoot {
    pub fn new(dir: PathBuf) -> Self {
        Self(dir)
    }
}

impl RootProvider for SingleWorkingDirectoryRoot {
    fn roots(&self) -> Vec<Root> {
        vec![Root {
            name: self.0.display().to_string(),
            subpath: String::new(),
        }]
    }
}

/// Pick the root provider for this platform.
///
/// On Windows every existing drive letter is a root. Elsewhere, or if no
/// drive answers, `default_root` is the only root.
pub fn platform_roots(default_root: PathBuf) -> Box<dyn RootProvider> {
    #[cfg(windows)]
    {
        let drives: Vec<PathBuf> = (b'A'..=b'Z')
            .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
            .filter(|p| p.exists())
            .collect();
        if !drives.is_empty() {
            tracing::info!("Found {} drive(s)", drives.len());
            return Box::new(FixedRoots::new(drives));
        }
    }
    Box::new(SingleWorkingDirectoryRoot::new(default_root))
}
