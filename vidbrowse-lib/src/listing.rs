//! Directory listing
//!
//! Enumerates the direct children of a resolved directory and keeps the
//! subfolders and the recognized video files, each list in natural order.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::error::{BrowseError, Result};
use crate::extensions::is_video_file;
use crate::natural::sort_natural;
use crate::path::{PathKind, ResolvedPath};

/// Whether the directory could actually be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingAccess {
    /// Every entry was enumerated
    Complete,
    /// Permission was refused; the listing is empty
    PermissionDenied,
}

/// Folders and videos found directly under a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryListing {
    pub folders: Vec<String>,
    pub videos: Vec<String>,
    pub access: ListingAccess,
}

impl DirectoryListing {
    fn permission_denied() -> Self {
        Self {
            folders: Vec::new(),
            videos: Vec::new(),
            access: ListingAccess::PermissionDenied,
        }
    }

    /// No folders and no videos, for whatever reason
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.videos.is_empty()
    }

    pub fn was_denied(&self) -> bool {
        self.access == ListingAccess::PermissionDenied
    }
}

/// List a resolved directory.
///
/// A directory we may not read yields an empty listing marked
/// `PermissionDenied`. Any other failure, such as the directory vanishing
/// after it was resolved, is an `Enumeration` error.
pub fn list_directory(dir: &ResolvedPath) -> Result<DirectoryListing> {
    if dir.kind() != PathKind::Directory {
        return Err(BrowseError::Enumeration {
            path: dir.path().to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        });
    }

    match read_entries(dir.path()) {
        Ok(listing) => {
            tracing::debug!(
                "Listed {}: {} folders, {} videos",
                dir.path().display(),
                listing.folders.len(),
                listing.videos.len()
            );
            Ok(listing)
        }
        Err(e) => recover(dir.path(), e),
    }
}

fn read_entries(path: &Path) -> io::Result<DirectoryListing> {
    let mut folders = Vec::new();
    let mut videos = Vec::new();

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                tracing::debug!("Skipping non UTF-8 name {:?} in {}", raw, path.display());
                continue;
            }
        };

        // Follow symlinks, a link to a folder is a folder.
        let meta = match fs::metadata(entry.path()) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", entry.path().display(), e);
                continue;
            }
        };

        if meta.is_dir() {
            folders.push(name);
        } else if meta.is_file() && is_video_file(&name) {
            videos.push(name);
        }
    }

    sort_natural(&mut folders);
    sort_natural(&mut videos);

    Ok(DirectoryListing {
        folders,
        videos,
        access: ListingAccess::Complete,
    })
}

fn recover(path: &Path, err: io::Error) -> Result<DirectoryListing> {
    if err.kind() == io::ErrorKind::PermissionDenied {
        tracing::warn!("Permission denied listing {}", path.display());
        return Ok(DirectoryListing::permission_denied());
    }
    Err(BrowseError::Enumeration {
        path: path.to_path_buf(),
        source: err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathResolver;
    use crate::tests::fixtures::TestTree;

    fn list(tree: &TestTree, subpath: &str) -> Result<DirectoryListing> {
        let resolver = PathResolver::new(tree.root());
        let dir = resolver.resolve(subpath, PathKind::Directory)?;
        list_directory(&dir)
    }

    #[test]
    fn test_classification() {
        let tree = TestTree::with_entries(&["a.mp4", "b.txt", "sub1/", "sub2/"]);
        let listing = list(&tree, "").unwrap();
        assert_eq!(listing.folders, vec!["sub1", "sub2"]);
        assert_eq!(listing.videos, vec!["a.mp4"]);
        assert_eq!(listing.access, ListingAccess::Complete);
    }

    #[test]
    fn test_uppercase_extension() {
        let tree = TestTree::with_entries(&["Movie.MP4", "Readme.TXT"]);
        let listing = list(&tree, "").unwrap();
        assert_eq!(listing.videos, vec!["Movie.MP4"]);
        assert!(listing.folders.is_empty());
    }

    #[test]
    fn test_natural_order() {
        let tree = TestTree::with_entries(&[
            "Episode 10.mkv",
            "Episode 2.mkv",
            "episode 1.mkv",
            "Season 10/",
            "season 9/",
            "Extras/",
        ]);
        let listing = list(&tree, "").unwrap();
        assert_eq!(listing.videos, vec!["episode 1.mkv", "Episode 2.mkv", "Episode 10.mkv"]);
        assert_eq!(listing.folders, vec!["Extras", "season 9", "Season 10"]);
    }

    #[test]
    fn test_direct_children_only() {
        let tree = TestTree::with_entries(&["show/s01/e01.mp4", "top.webm"]);
        let listing = list(&tree, "").unwrap();
        assert_eq!(listing.folders, vec!["show"]);
        assert_eq!(listing.videos, vec!["top.webm"]);
    }

    #[test]
    fn test_folder_with_video_extension() {
        let tree = TestTree::with_entries(&["clips.mp4/", ".mp4"]);
        let listing = list(&tree, "").unwrap();
        assert_eq!(listing.folders, vec!["clips.mp4"]);
        assert!(listing.videos.is_empty());
    }

    #[test]
    fn test_empty_directory() {
        let tree = TestTree::new();
        let listing = list(&tree, "").unwrap();
        assert!(listing.is_empty());
        assert!(!listing.was_denied());
    }

    #[test]
    fn test_idempotent() {
        let tree = TestTree::with_entries(&["b 10.mp4", "b 2.mp4", "B 1.avi", "x/", "X2/", "x10/"]);
        let first = list(&tree, "").unwrap();
        let second = list(&tree, "").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_recover_permission_denied() {
        let err = io::Error::from(io::ErrorKind::PermissionDenied);
        let listing = recover(Path::new("/locked"), err).unwrap();
        assert!(listing.is_empty());
        assert!(listing.was_denied());
    }

    #[test]
    fn test_recover_other_errors() {
        let err = io::Error::from(io::ErrorKind::NotFound);
        match recover(Path::new("/gone"), err) {
            Err(BrowseError::Enumeration { path, source }) => {
                assert_eq!(path, Path::new("/gone"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected enumeration failure, got {:?}", other),
        }
    }

    #[test]
    fn test_vanished_directory() {
        let tree = TestTree::new();
        tree.dir("gone");
        let resolver = PathResolver::new(tree.root());
        let dir = resolver.resolve("gone", PathKind::Directory).unwrap();
        fs::remove_dir(dir.path()).unwrap();

        let err = list_directory(&dir).unwrap_err();
        assert!(matches!(err, BrowseError::Enumeration { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_rejects_video_kind() {
        let tree = TestTree::with_entries(&["a.mp4"]);
        let resolver = PathResolver::new(tree.root());
        let file = resolver.resolve("a.mp4", PathKind::VideoFile).unwrap();
        assert!(matches!(
            list_directory(&file),
            Err(BrowseError::Enumeration { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let tree = TestTree::with_entries(&["locked/inner.mp4"]);
        let locked = tree.root().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits; nothing to check then.
        let readable = fs::read_dir(&locked).is_ok();
        let listing = list(&tree, "locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let listing = listing.unwrap();
        if !readable {
            assert!(listing.is_empty());
            assert!(listing.was_denied());
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_followed() {
        let tree = TestTree::with_entries(&["real/", "real.mp4"]);
        std::os::unix::fs::symlink(tree.root().join("real"), tree.root().join("link")).unwrap();
        std::os::unix::fs::symlink(tree.root().join("real.mp4"), tree.root().join("link.mp4"))
            .unwrap();
        std::os::unix::fs::symlink(tree.root().join("missing"), tree.root().join("dangling.mp4"))
            .unwrap();

        let listing = list(&tree, "").unwrap();
        assert_eq!(listing.folders, vec!["link", "real"]);
        assert_eq!(listing.videos, vec!["link.mp4", "real.mp4"]);
    }
}
