use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{kind} with id {id} does not exist")]
    EntityNotFound { kind: &'static str, id: Uuid },

    /// The acting user is not the owner of the booked item. Reported as
    /// not-found so the booking's existence is not leaked.
    #[error("User {0} is not the owner of the booked item")]
    WrongOwner(Uuid),

    /// Owners cannot book their own items; also reported as not-found.
    #[error("User {0} cannot book their own item")]
    BookerIsOwner(Uuid),

    #[error("Item {0} is not available for booking")]
    ItemNotAvailable(Uuid),

    #[error("Booking {0} has already been confirmed")]
    StatusAlreadyConfirmed(Uuid),

    #[error("Booking end must be strictly after start")]
    IncorrectBookingDates,

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::EntityNotFound { kind, id } => {
                AppError::NotFound(format!("{} {} not found", kind, id))
            }
            BookingError::WrongOwner(_) | BookingError::BookerIsOwner(_) => {
                AppError::NotFound(err.to_string())
            }
            BookingError::ItemNotAvailable(_)
            | BookingError::StatusAlreadyConfirmed(_)
            | BookingError::IncorrectBookingDates
            | BookingError::UnknownState(_) => AppError::BadRequest(err.to_string()),
            BookingError::Validation(msg) => AppError::BadRequest(msg),
            BookingError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
