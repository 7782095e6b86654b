use std::path::PathBuf;

use thiserror::Error;

/// Main error type for browsing and streaming
#[derive(Error, Debug)]
pub enum BrowseError {
    /// The requested path does not exist or is not of the required kind
    #[error("Not found: {0}")]
    NotFound(String),

    /// The directory could not be read for a reason other than permissions
    #[error("Failed to enumerate {}: {source}", .path.display())]
    Enumeration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The video file became unreadable after it was resolved
    #[error("Failed to stream {}: {source}", .path.display())]
    Stream {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BrowseError {
    /// True for errors a transport should render as "not found"
    pub fn is_not_found(&self) -> bool {
        matches!(self, BrowseError::NotFound(_))
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BrowseError>;
