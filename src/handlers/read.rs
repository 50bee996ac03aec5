use crate::{
    errors::{AppError, AppResult},
    server::AppState,
};
use axum::{
    body::Body,
    extract::State,
    http::Uri,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

/// Directories come back as a JSON tree, files as their raw bytes.
pub async fn read(State(state): State<AppState>, uri: Uri) -> AppResult<Response> {
    let target = state.resolver.resolve(uri.path())?;
    let meta = tokio::fs::metadata(&target.absolute)
        .await
        .map_err(|_| AppError::NotFound)?;

    if meta.is_dir() {
        debug!(path = %target.relative, "listing directory");
        let tree = state.tree.clone();
        let dir = target.absolute.clone();
        let entries = tokio::task::spawn_blocking(move || tree.build(&dir))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))??;
        return Ok(Json(entries).into_response());
    }

    let data = tokio::fs::read(&target.absolute).await?;
    Ok(Response::new(Body::from(data)))
}
