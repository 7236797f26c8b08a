//! Extractor for the `X-Sharer-User-Id` header.

use crate::errors::AppError;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Name of the header carrying the acting user's id.
pub const SHARER_USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// Extractor for the `X-Sharer-User-Id` header.
///
/// Every authenticated endpoint identifies the caller through this header.
/// A missing or malformed header is rejected with 400 before the handler
/// runs; whether the user actually exists is checked by the services.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::SharerUserId;
///
/// async fn list_items(SharerUserId(user_id): SharerUserId) -> String {
///     format!("Items of user {}", user_id)
/// }
/// ```
pub struct SharerUserId(pub Uuid);

impl<S> FromRequestParts<S> for SharerUserId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SHARER_USER_ID_HEADER)
            .ok_or_else(|| {
                AppError::BadRequest(format!("Missing {} header", SHARER_USER_ID_HEADER))
                    .into_response()
            })?
            .to_str()
            .map_err(|_| {
                AppError::BadRequest(format!("Invalid {} header", SHARER_USER_ID_HEADER))
                    .into_response()
            })?;

        match Uuid::parse_str(value) {
            Ok(uuid) => Ok(SharerUserId(uuid)),
            Err(_) => Err(AppError::BadRequest(format!(
                "Invalid {} header: {}",
                SHARER_USER_ID_HEADER, value
            ))
            .into_response()),
        }
    }
}
