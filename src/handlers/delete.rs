use crate::{
    errors::{AppError, AppResult},
    server::AppState,
};
use axum::{extract::State, http::{StatusCode, Uri}};
use std::io::ErrorKind;
use tracing::info;

/// Removes a file or a whole subtree. A missing target counts as deleted.
pub async fn delete(State(state): State<AppState>, uri: Uri) -> AppResult<StatusCode> {
    let target = state.resolver.resolve(uri.path())?;
    if target.is_root() {
        return Err(AppError::InvalidPath);
    }

    let meta = match tokio::fs::symlink_metadata(&target.absolute).await {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StatusCode::NO_CONTENT),
        Err(e) => return Err(e.into()),
    };

    let removed = if meta.is_dir() {
        tokio::fs::remove_dir_all(&target.absolute).await
    } else {
        tokio::fs::remove_file(&target.absolute).await
    };
    match removed {
        Ok(()) => info!(path = %target.relative, dir = meta.is_dir(), "deleted"),
        // lost a race with another delete
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    Ok(StatusCode::NO_CONTENT)
}
