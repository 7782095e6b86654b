use serde::Serialize;

use crate::error::Result;
use crate::listing::{list_directory, DirectoryListing, ListingAccess};
use crate::path::{breadcrumbs, Breadcrumb, PathKind, PathResolver};
use crate::stream::{open_video, VideoStream};

/// Everything needed to render one folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowsePage {
    /// The subpath as requested, still encoded
    pub subpath: String,
    /// Absolute path of the listed directory
    pub current_path: String,
    pub folders: Vec<String>,
    pub videos: Vec<String>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub access: ListingAccess,
}

/// Browse a folder.
///
/// Returns `NotFound` if `raw_subpath` is not an existing directory, and
/// `Enumeration` if it could not be read.
pub fn browse(resolver: &PathResolver, raw_subpath: &str) -> Result<BrowsePage> {
    let dir = resolver.resolve(raw_subpath, PathKind::Directory)?;
    let DirectoryListing {
        folders,
        videos,
        access,
    } = list_directory(&dir)?;

    Ok(BrowsePage {
        subpath: raw_subpath.to_string(),
        current_path: dir.path().display().to_string(),
        folders,
        videos,
        breadcrumbs: breadcrumbs(raw_subpath),
        access,
    })
}

/// Open a video for streaming.
///
/// Returns `NotFound` for a missing file or an unrecognized extension,
/// and `Stream` if the file could not be opened.
pub fn open_video_path(resolver: &PathResolver, raw_path: &str) -> Result<VideoStream> {
    let video = resolver.resolve(raw_path, PathKind::VideoFile)?;
    open_video(&video)
}
