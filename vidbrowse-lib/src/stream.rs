//! Video streaming
//!
//! Opens a resolved video file as a sequential, read-only byte stream.
//! Content types and range requests are the transport's business.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::{BrowseError, Result};
use crate::path::{PathKind, ResolvedPath};

/// An open video file. Single use: read it front to back, or hand the
/// file to an async runtime with `into_file`.
#[derive(Debug)]
pub struct VideoStream {
    path: PathBuf,
    len: u64,
    file: File,
}

impl VideoStream {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File size in bytes when it was opened
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Lowercase extension, for content type inference
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    pub fn into_file(self) -> File {
        self.file
    }
}

impl Read for VideoStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

/// Open a resolved video file.
///
/// Fails with `Stream` when the file vanished or became unreadable since
/// it was resolved.
pub fn open_video(video: &ResolvedPath) -> Result<VideoStream> {
    let path = video.path().to_path_buf();
    if video.kind() != PathKind::VideoFile {
        return Err(BrowseError::Stream {
            path,
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a video file"),
        });
    }

    let open = || -> io::Result<(File, u64)> {
        let file = File::open(&path)?;
        let len = file.metadata()?.len();
        Ok((file, len))
    };

    match open() {
        Ok((file, len)) => {
            tracing::debug!("Streaming {} ({} bytes)", path.display(), len);
            Ok(VideoStream { path, len, file })
        }
        Err(source) => {
            tracing::warn!("Failed to open {}: {}", path.display(), source);
            Err(BrowseError::Stream { path, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathResolver;
    use crate::tests::fixtures::TestTree;

    #[test]
    fn test_streams_full_contents() {
        let tree = TestTree::new();
        let data: Vec<u8> = (0..=255u8).cycle().take(100_000).collect();
        tree.file_with("show/ep1.mkv", &data);

        let resolver = PathResolver::new(tree.root());
        let video = resolver.resolve("show/ep1.mkv", PathKind::VideoFile).unwrap();
        let mut stream = open_video(&video).unwrap();
        assert_eq!(stream.len(), data.len() as u64);
        assert_eq!(stream.extension().as_deref(), Some("mkv"));

        let mut out = Vec::new();
        stream.read_to_end(&mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_empty_file() {
        let tree = TestTree::with_entries(&["empty.mp4"]);
        let resolver = PathResolver::new(tree.root());
        let video = resolver.resolve("empty.mp4", PathKind::VideoFile).unwrap();
        let stream = open_video(&video).unwrap();
        assert!(stream.is_empty());
    }

    #[test]
    fn test_vanished_file() {
        let tree = TestTree::with_entries(&["gone.mp4"]);
        let resolver = PathResolver::new(tree.root());
        let video = resolver.resolve("gone.mp4", PathKind::VideoFile).unwrap();
        std::fs::remove_file(video.path()).unwrap();

        match open_video(&video) {
            Err(BrowseError::Stream { source, .. }) => {
                assert_eq!(source.kind(), io::ErrorKind::NotFound)
            }
            other => panic!("expected stream failure, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_directory_kind() {
        let tree = TestTree::new();
        let resolver = PathResolver::new(tree.root());
        let dir = resolver.resolve("", PathKind::Directory).unwrap();
        assert!(matches!(open_video(&dir), Err(BrowseError::Stream { .. })));
    }
}
