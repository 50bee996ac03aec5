pub mod delete;
pub mod read;
pub mod write;

use crate::errors::AppError;

/// Anything the store route does not dispatch.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Requests outside the store prefix.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
