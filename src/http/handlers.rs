//! HTTP request handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use std::sync::Arc;
use vidbrowse_lib::{BrowseError, BrowsePage, Root};

use crate::state::AppState;

use super::page;

/// Custom error response
#[derive(Debug)]
pub enum HttpError {
    NotFound(&'static str),
    InternalError(String),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::NotFound(m) => (StatusCode::NOT_FOUND, m.to_string()),
            HttpError::InternalError(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };

        (status, message).into_response()
    }
}

impl HttpError {
    /// Map a library error, rendering `NotFound` with `not_found`.
    pub fn from_browse(err: BrowseError, not_found: &'static str) -> Self {
        match err {
            BrowseError::NotFound(path) => {
                tracing::debug!("Not found: {}", path);
                HttpError::NotFound(not_found)
            }
            other => {
                tracing::error!("{}", other);
                HttpError::InternalError(other.to_string())
            }
        }
    }
}

pub(crate) const INVALID_DIRECTORY: &str = "Invalid directory path";

/// Health check endpoint
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Version information endpoint
pub async fn version_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "online",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Index page
/// GET /
///
/// With a single root, go straight to browsing it. Otherwise list the
/// roots (drive letters, configured folders).
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let roots = state.roots.roots();
    match roots.as_slice() {
        [root] => Redirect::to(&page::browse_href(&root.subpath)).into_response(),
        _ => Html(page::render_roots(&roots)).into_response(),
    }
}

/// Browse the default root
/// GET /browse/
pub async fn browse_root(State(state): State<Arc<AppState>>) -> Result<Html<String>, HttpError> {
    let page = load_page(state, String::new()).await?;
    Ok(Html(page::render_browse(&page)))
}

/// Browse a folder
/// GET /browse/{*subpath}
pub async fn browse(
    State(state): State<Arc<AppState>>,
    Path(subpath): Path<String>,
) -> Result<Html<String>, HttpError> {
    let page = load_page(state, subpath).await?;
    Ok(Html(page::render_browse(&page)))
}

/// JSON roots
/// GET /api/roots
pub async fn api_roots(State(state): State<Arc<AppState>>) -> Json<Vec<Root>> {
    Json(state.roots.roots())
}

/// JSON listing of the default root
/// GET /api/browse/
pub async fn api_browse_root(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BrowsePage>, HttpError> {
    Ok(Json(load_page(state, String::new()).await?))
}

/// JSON listing of a folder
/// GET /api/browse/{*subpath}
pub async fn api_browse(
    State(state): State<Arc<AppState>>,
    Path(subpath): Path<String>,
) -> Result<Json<BrowsePage>, HttpError> {
    Ok(Json(load_page(state, subpath).await?))
}

/// Resolve and list on the blocking pool.
async fn load_page(state: Arc<AppState>, subpath: String) -> Result<BrowsePage, HttpError> {
    tokio::task::spawn_blocking(move || vidbrowse_lib::browse(&state.resolver, &subpath))
        .await
        .map_err(|e| HttpError::InternalError(e.to_string()))?
        .map_err(|e| HttpError::from_browse(e, INVALID_DIRECTORY))
}
