use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};

/// Serves the single page for `/` and any path that is not a static file.
pub async fn index_handler(
    axum::Extension(index_file): axum::Extension<PathBuf>,
) -> impl IntoResponse {
    match tokio::fs::read_to_string(&index_file).await {
        Ok(contents) => Html(contents).into_response(),
        Err(error) => {
            tracing::error!("failed to read {}: {error}", index_file.display());
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
