use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("Item {0} not found")]
    NotFound(i64),

    /// Any persistence failure
    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Processing item {0} timed out")]
    Timeout(i64),

    /// A worker task panicked or could not be joined
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl From<DbErr> for ItemError {
    fn from(err: DbErr) -> Self {
        ItemError::Store(err.to_string())
    }
}

impl From<ValidationErrors> for ItemError {
    fn from(err: ValidationErrors) -> Self {
        ItemError::Validation(err.to_string())
    }
}

impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => AppError::NotFound(format!("Item {} not found", id)),
            ItemError::Store(msg) => AppError::Database(msg),
            ItemError::Validation(msg) => AppError::BadRequest(msg),
            ItemError::Timeout(id) => {
                AppError::Timeout(format!("Processing item {} timed out", id))
            }
            ItemError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
