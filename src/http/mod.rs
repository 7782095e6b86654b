//! HTTP server module
//!
//! This module handles HTTP request routing and handling:
//! - Axum router with the browse, video and API endpoints
//! - Request handlers mapping library results to responses
//! - Video streaming with content types per extension
//! - HTML rendering of folder listings
//! - Request logging middleware

pub mod handlers;
pub mod middleware;
pub mod page;
pub mod routes;
pub mod video;

pub use routes::create_router;
