//! Video streaming endpoint
//!
//! Sends the whole file as the response body. The file is read in chunks
//! as the client consumes them; a client that disconnects drops the stream.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use futures_util::TryStreamExt;
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::state::AppState;

use super::handlers::HttpError;

pub(crate) const VIDEO_NOT_FOUND: &str = "Video not found";

/// Content type for a lowercase video extension
pub fn content_type(extension: &str) -> &'static str {
    match extension {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "ogv" => "video/ogg",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        "3gp" => "video/3gpp",
        _ => "application/octet-stream",
    }
}

/// Stream a video file
/// GET /video/{*path}
pub async fn stream_video(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, HttpError> {
    let video =
        tokio::task::spawn_blocking(move || vidbrowse_lib::open_video_path(&state.resolver, &path))
            .await
            .map_err(|e| HttpError::InternalError(e.to_string()))?
            .map_err(|e| HttpError::from_browse(e, VIDEO_NOT_FOUND))?;

    let len = video.len();
    let mime = content_type(video.extension().as_deref().unwrap_or_default());
    let source = video.path().to_path_buf();
    tracing::info!("Streaming {} ({} bytes, {})", source.display(), len, mime);

    let file = tokio::fs::File::from_std(video.into_file());
    let stream = ReaderStream::new(file).inspect_err(move |e| {
        tracing::warn!("Stream of {} failed: {}", source.display(), e);
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime)
        .header(header::CONTENT_LENGTH, len.to_string())
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(stream))
        .map_err(|e| HttpError::InternalError(e.to_string()))
}
