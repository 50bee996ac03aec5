use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Methods the store route answers; sent back in `Allow` on a 405.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid path")]
    InvalidPath,
    #[error("not found")]
    NotFound,
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidPath => "InvalidPath",
            AppError::NotFound => "NotFound",
            AppError::MalformedPayload(_) => "MalformedPayload",
            AppError::MethodNotAllowed => "MethodNotAllowed",
            AppError::Io(_) => "IOFailure",
            AppError::Internal(_) => "Internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidPath | AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Io(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        } else {
            tracing::warn!(code = self.code(), error = %self, "request rejected");
        }

        let body = ErrorBody {
            code: self.code(),
            message: self.to_string(),
        };
        let mut resp = (status, Json(body)).into_response();
        if matches!(self, AppError::MethodNotAllowed) {
            resp.headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }
        resp
    }
}
