//! Recognized video extensions
//!
//! The set is fixed for the lifetime of the process. It is built once,
//! on first use or through `init_extensions` at startup, and shared by
//! every request without locking.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;

static EXTENSIONS: OnceLock<VideoExtensionSet> = OnceLock::new();

/// Extensions, without the leading dot, that are served as video.
const DEFAULT_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "m4v", "3gp", "ogv",
];

/// Initialize the global extension set.
/// Should be called once at application startup; later calls are no-ops.
pub fn init_extensions() -> &'static VideoExtensionSet {
    let set = video_extensions();
    tracing::debug!("Recognized video extensions: {}", set);
    set
}

/// Access the global extension set
pub fn video_extensions() -> &'static VideoExtensionSet {
    EXTENSIONS.get_or_init(VideoExtensionSet::default)
}

/// Check if a file name or path has a recognized video extension
pub fn is_video_file<P: AsRef<Path>>(path: P) -> bool {
    video_extensions().matches(path.as_ref())
}

/// Immutable set of lowercase file extensions
#[derive(Debug, Clone)]
pub struct VideoExtensionSet {
    extensions: BTreeSet<&'static str>,
}

impl Default for VideoExtensionSet {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().copied().collect(),
        }
    }
}

impl VideoExtensionSet {
    /// Check a bare extension (no dot), ignoring case
    pub fn contains(&self, ext: &str) -> bool {
        self.extensions.contains(ext.to_lowercase().as_str())
    }

    /// Check the extension of a path. Paths without an extension, and
    /// dotfiles such as `.mp4`, never match.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.contains(e))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.extensions.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl std::fmt::Display for VideoExtensionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut first = true;
        for ext in &self.extensions {
            if !first {
                write!(f, " ")?;
            }
            write!(f, ".{}", ext)?;
            first = false;
        }
        Ok(())
    }
}
