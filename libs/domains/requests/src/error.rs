use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Request with id {0} does not exist")]
    RequestNotFound(Uuid),

    #[error("User with id {0} does not exist")]
    UserNotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type RequestResult<T> = Result<T, RequestError>;

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::RequestNotFound(id) => {
                AppError::NotFound(format!("Request {} not found", id))
            }
            RequestError::UserNotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            RequestError::Validation(msg) => AppError::BadRequest(msg),
            RequestError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
