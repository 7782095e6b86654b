//! Path resolution
//!
//! Turns the subpath carried by a request into an absolute filesystem
//! path, checks that it exists and has the required kind, and derives
//! the breadcrumb trail shown above a listing.
//!
//! Subpaths arrive percent-encoded and may use either `/` or `\` as a
//! separator, because the browser rebuilds them from folder clicks.

use std::fs;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::error::{BrowseError, Result};
use crate::extensions::is_video_file;

/// What a resolved path is required to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Directory,
    VideoFile,
}

/// An absolute path that existed, with the required kind, when it was checked.
///
/// Only `PathResolver::resolve` creates these. Nothing is cached: the
/// filesystem can change under us, so every request resolves again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    path: PathBuf,
    kind: PathKind,
}

impl ResolvedPath {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> PathKind {
        self.kind
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// One element of the navigation trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    /// Display name (one path segment)
    pub name: String,
    /// Subpath up to and including this segment
    pub path: String,
}

/// Resolves request subpaths against a default root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver whose empty subpath maps to `root`.
    /// A relative root is made absolute against the working directory.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        Self { root }
    }

    /// Create a resolver rooted at the process's current working directory
    pub fn with_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// The default root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a raw (still encoded) subpath to a filesystem path, without
    /// touching the filesystem.
    ///
    /// Relative subpaths are joined onto the root, absolute ones replace it.
    pub fn to_fs_path(&self, raw_subpath: &str) -> PathBuf {
        let normalized = normalize_separators(&decode_subpath(raw_subpath));
        if normalized.is_empty() {
            return self.root.clone();
        }
        self.root.join(normalized)
    }

    /// Resolve a raw subpath and check it against `kind`.
    ///
    /// Every failure, including I/O errors while checking, is `NotFound`.
    pub fn resolve(&self, raw_subpath: &str, kind: PathKind) -> Result<ResolvedPath> {
        let path = self.to_fs_path(raw_subpath);

        let meta = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!("Cannot stat {}: {}", path.display(), e);
                return Err(BrowseError::NotFound(path.display().to_string()));
            }
        };

        let ok = match kind {
            PathKind::Directory => meta.is_dir(),
            PathKind::VideoFile => meta.is_file() && is_video_file(&path),
        };
        if !ok {
            tracing::debug!("{} is not a {:?}", path.display(), kind);
            return Err(BrowseError::NotFound(path.display().to_string()));
        }

        Ok(ResolvedPath { path, kind })
    }
}

/// Percent-decode a subpath. Invalid UTF-8 is replaced, not rejected.
pub fn decode_subpath(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Rewrite `\` separators to `/`.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Derive the breadcrumb trail for a raw subpath.
///
/// The subpath is split on separators (empty segments dropped) and each
/// crumb carries the path of all segments up to itself. The crumbs use
/// the undecoded text, so following a crumb's path resolves exactly like
/// the request did. A leading `/` is kept on every crumb so absolute
/// subpaths stay absolute, and a drive designator such as `C:` keeps its
/// trailing separator.
pub fn breadcrumbs(raw_subpath: &str) -> Vec<Breadcrumb> {
    let normalized = normalize_separators(raw_subpath);
    let prefix = if normalized.starts_with('/') { "/" } else { "" };

    let mut crumbs: Vec<Breadcrumb> = Vec::new();
    let mut cumulative = String::from(prefix);
    for part in normalized.split('/').filter(|p| !p.is_empty()) {
        if !cumulative.is_empty() && !cumulative.ends_with('/') {
            cumulative.push('/');
        }
        cumulative.push_str(part);
        if crumbs.is_empty() && is_drive_designator(part) {
            cumulative.push('/');
        }
        crumbs.push(Breadcrumb {
            name: part.to_string(),
            path: cumulative.clone(),
        });
    }
    crumbs
}

fn is_drive_designator(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 2 && b[0].is_ascii_alphabetic() && b[1] == b':'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures::TestTree;

    fn crumb(name: &str, path: &str) -> Breadcrumb {
        Breadcrumb {
            name: name.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_breadcrumbs() {
        assert_eq!(
            breadcrumbs("A/B/C"),
            vec![crumb("A", "A"), crumb("B", "A/B"), crumb("C", "A/B/C")]
        );
    }

    #[test]
    fn test_breadcrumbs_mixed_separators() {
        assert_eq!(
            breadcrumbs("A\\B/C/"),
            vec![crumb("A", "A"), crumb("B", "A/B"), crumb("C", "A/B/C")]
        );
        assert!(breadcrumbs("").is_empty());
        assert!(breadcrumbs("//").is_empty());
    }

    #[test]
    fn test_breadcrumbs_absolute() {
        assert_eq!(
            breadcrumbs("/media/tv"),
            vec![crumb("media", "/media"), crumb("tv", "/media/tv")]
        );
        assert_eq!(
            breadcrumbs("C:\\Videos"),
            vec![crumb("C:", "C:/"), crumb("Videos", "C:/Videos")]
        );
    }

    #[test]
    fn test_breadcrumbs_stay_encoded() {
        assert_eq!(
            breadcrumbs("My%20Shows/S01"),
            vec![crumb("My%20Shows", "My%20Shows"), crumb("S01", "My%20Shows/S01")]
        );
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode_subpath("My%20Shows%2FS01"), "My Shows/S01");
        assert_eq!(decode_subpath("plain"), "plain");
        assert_eq!(decode_subpath("bad%FFbyte"), "bad\u{FFFD}byte");
    }

    #[test]
    fn test_empty_resolves_to_root() {
        let tree = TestTree::new();
        let resolver = PathResolver::new(tree.root());
        let resolved = resolver.resolve("", PathKind::Directory).unwrap();
        assert_eq!(resolved.path(), tree.root());
    }

    #[test]
    fn test_resolve_separator_forms() {
        let tree = TestTree::new();
        tree.dir("A/B/C");
        let resolver = PathResolver::new(tree.root());

        let direct = resolver.resolve("A/B/C", PathKind::Directory).unwrap();
        let backslash = resolver.resolve("A\\B\\C", PathKind::Directory).unwrap();
        let encoded = resolver.resolve("A%2FB%5CC", PathKind::Directory).unwrap();
        assert_eq!(direct, backslash);
        assert_eq!(direct, encoded);
        assert_eq!(direct.path(), tree.root().join("A/B/C"));
        assert_eq!(direct.kind(), PathKind::Directory);
    }

    #[test]
    fn test_last_breadcrumb_round_trip() {
        let tree = TestTree::new();
        tree.dir("A/B/C");
        let resolver = PathResolver::new(tree.root());

        let crumbs = breadcrumbs("A/B/C");
        let last = crumbs.last().unwrap();
        assert_eq!(
            resolver.resolve(&last.path, PathKind::Directory).unwrap(),
            resolver.resolve("A/B/C", PathKind::Directory).unwrap()
        );
        // Every intermediate crumb is navigable too.
        for c in &crumbs {
            assert!(resolver.resolve(&c.path, PathKind::Directory).is_ok());
        }
    }

    #[test]
    fn test_absolute_subpath_replaces_root() {
        let tree = TestTree::new();
        tree.dir("elsewhere");
        let resolver = PathResolver::new("/nonexistent-root-for-test");
        let abs = tree.root().join("elsewhere");
        let resolved = resolver
            .resolve(&abs.to_string_lossy(), PathKind::Directory)
            .unwrap();
        assert_eq!(resolved.path(), abs);
    }

    #[test]
    fn test_missing_path_not_found() {
        let tree = TestTree::new();
        let resolver = PathResolver::new(tree.root());
        let err = resolver.resolve("missing", PathKind::Directory).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_kind_mismatch_not_found() {
        let tree = TestTree::new();
        tree.file("notes.txt");
        tree.file("movie.mp4");
        tree.dir("folder.mp4");
        let resolver = PathResolver::new(tree.root());

        assert!(resolver.resolve("notes.txt", PathKind::VideoFile).unwrap_err().is_not_found());
        assert!(resolver.resolve("notes.txt", PathKind::Directory).unwrap_err().is_not_found());
        assert!(resolver.resolve("movie.mp4", PathKind::Directory).unwrap_err().is_not_found());
        assert!(resolver.resolve("folder.mp4", PathKind::VideoFile).unwrap_err().is_not_found());
        assert!(resolver.resolve("movie.mp4", PathKind::VideoFile).is_ok());
    }

    #[test]
    fn test_uppercase_extension_is_video() {
        let tree = TestTree::new();
        tree.file("Movie.MP4");
        let resolver = PathResolver::new(tree.root());
        let resolved = resolver.resolve("Movie.MP4", PathKind::VideoFile).unwrap();
        assert_eq!(resolved.kind(), PathKind::VideoFile);
    }
}
