use crate::{
    errors::{AppError, AppResult},
    server::AppState,
};
use axum::{extract::State, http::{StatusCode, Uri}};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

/// Body of an upsert. An empty `title` asks for a folder instead of a file.
#[derive(Debug, Deserialize)]
pub struct DiagramPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

pub async fn write(State(state): State<AppState>, uri: Uri, body: Bytes) -> AppResult<StatusCode> {
    let target = state.resolver.resolve(uri.path())?;
    let payload: DiagramPayload =
        serde_json::from_slice(&body).map_err(|e| AppError::MalformedPayload(e.to_string()))?;
    if target.is_root() {
        return Err(AppError::InvalidPath);
    }

    if payload.title.is_empty() {
        tokio::fs::create_dir_all(&target.absolute).await?;
        info!(path = %target.relative, "folder created");
        return Ok(StatusCode::CREATED);
    }

    if let Some(parent) = target.absolute.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&target.absolute, payload.content.as_bytes()).await?;

    info!(path = %target.relative, title = %payload.title, bytes = payload.content.len(), "diagram written");
    Ok(StatusCode::CREATED)
}
