//! Shared test helpers
//!
//! - `fixtures`: scratch directory trees for resolver, lister and streamer tests
//! - `properties`: end-to-end checks of the browse and video entry points
