pub(crate) mod api;
pub(crate) mod error;
pub(crate) mod extensions;
pub(crate) mod listing;
pub(crate) mod natural;
pub(crate) mod path;
pub(crate) mod roots;
pub(crate) mod stream;

#[cfg(test)]
pub(crate) mod tests;

pub use api::*;
pub use error::{BrowseError, Result};
pub use extensions::{init_extensions, is_video_file, video_extensions, VideoExtensionSet};
pub use listing::{list_directory, DirectoryListing, ListingAccess};
pub use natural::{natural_cmp, natural_key, sort_natural, NaturalKey};
pub use path::{
    breadcrumbs, decode_subpath, normalize_separators, Breadcrumb, PathKind, PathResolver,
    ResolvedPath,
};
pub use roots::{platform_roots, FixedRoots, Root, RootProvider, SingleWorkingDirectoryRoot};
pub use stream::{open_video, VideoStream};
