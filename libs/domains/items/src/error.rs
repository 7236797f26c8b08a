use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item with id {0} does not exist")]
    ItemNotFound(Uuid),

    #[error("User with id {0} does not exist")]
    UserNotFound(Uuid),

    /// Only the owner may change an item; reported as not-found so the
    /// item's existence is not confirmed to strangers.
    #[error("User {0} is not the owner of the item")]
    WrongOwner(Uuid),

    #[error("Comment allowed only for users with a completed booking")]
    CommentWithoutBooking,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::ItemNotFound(id) => AppError::NotFound(format!("Item {} not found", id)),
            ItemError::UserNotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            ItemError::WrongOwner(_) => AppError::NotFound(err.to_string()),
            ItemError::CommentWithoutBooking => AppError::BadRequest(err.to_string()),
            ItemError::Validation(msg) => AppError::BadRequest(msg),
            ItemError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
