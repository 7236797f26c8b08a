use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use axum_helpers::{ErrorResponse, SharerUserId, UuidPath, ValidatedJson};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::BookingResult;
use crate::models::{Booking, BookingRole, BookingStatus, CreateBooking, Page, StateParams};
use crate::ports::{ItemGateway, UserGateway};
use crate::repository::BookingRepository;
use crate::service::BookingService;

const TAG: &str = "bookings";

/// OpenAPI documentation for the Bookings API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_booking,
        confirm_booking,
        get_booking,
        list_bookings,
        list_owner_bookings
    ),
    components(schemas(Booking, BookingStatus, CreateBooking, ErrorResponse)),
    tags(
        (name = TAG, description = "Item booking endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Debug, Deserialize, IntoParams)]
struct ApprovedParams {
    approved: bool,
}

/// Create the booking router with all HTTP endpoints
pub fn router<R, I, U>(service: BookingService<R, I, U>) -> Router
where
    R: BookingRepository + 'static,
    I: ItemGateway + 'static,
    U: UserGateway + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_booking).get(list_bookings))
        .route("/owner", get(list_owner_bookings))
        .route("/{id}", get(get_booking).patch(confirm_booking))
        .with_state(shared_service)
}

/// Paginates only when both bounds are present
fn page_of(params: &StateParams) -> Option<Page> {
    match (params.from, params.size) {
        (Some(from), Some(size)) => Some(Page { from, size }),
        _ => None,
    }
}

/// Book an item for a time window
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created in WAITING status", body = Booking),
        (status = 400, description = "Item unavailable or invalid dates", body = ErrorResponse),
        (status = 404, description = "Item or booker not found, or booker owns the item", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_booking<R, I, U>(
    State(service): State<Arc<BookingService<R, I, U>>>,
    SharerUserId(booker_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateBooking>,
) -> BookingResult<impl IntoResponse>
where
    R: BookingRepository,
    I: ItemGateway,
    U: UserGateway,
{
    let booking = service.create_booking(booker_id, input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Approve or reject a booking (item owner only)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Booking ID"),
        ApprovedParams
    ),
    responses(
        (status = 200, description = "Booking status updated", body = Booking),
        (status = 400, description = "Status already confirmed", body = ErrorResponse),
        (status = 404, description = "Booking not found or wrong owner", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn confirm_booking<R, I, U>(
    State(service): State<Arc<BookingService<R, I, U>>>,
    SharerUserId(owner_id): SharerUserId,
    UuidPath(id): UuidPath,
    Query(params): Query<ApprovedParams>,
) -> BookingResult<Json<Booking>>
where
    R: BookingRepository,
    I: ItemGateway,
    U: UserGateway,
{
    let booking = service
        .confirm_booking(owner_id, id, params.approved)
        .await?;
    Ok(Json(booking))
}

/// Get a booking (visible to its booker or the item's owner)
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking found", body = Booking),
        (status = 404, description = "Booking not found or not visible", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_booking<R, I, U>(
    State(service): State<Arc<BookingService<R, I, U>>>,
    SharerUserId(actor_id): SharerUserId,
    UuidPath(id): UuidPath,
) -> BookingResult<Json<Booking>>
where
    R: BookingRepository,
    I: ItemGateway,
    U: UserGateway,
{
    let booking = service.find_booking(actor_id, id).await?;
    Ok(Json(booking))
}

/// List the acting user's own bookings, filtered by state
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(StateParams),
    responses(
        (status = 200, description = "Bookings newest first", body = Vec<Booking>),
        (status = 400, description = "Unknown state token or bad pagination", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn list_bookings<R, I, U>(
    State(service): State<Arc<BookingService<R, I, U>>>,
    SharerUserId(actor_id): SharerUserId,
    Query(params): Query<StateParams>,
) -> BookingResult<Json<Vec<Booking>>>
where
    R: BookingRepository,
    I: ItemGateway,
    U: UserGateway,
{
    let page = page_of(&params);
    let bookings = service
        .find_bookings(actor_id, BookingRole::Booker, params.state.as_deref(), page)
        .await?;
    Ok(Json(bookings))
}

/// List bookings of items the acting user owns, filtered by state
#[utoipa::path(
    get,
    path = "/owner",
    tag = TAG,
    params(StateParams),
    responses(
        (status = 200, description = "Bookings newest first", body = Vec<Booking>),
        (status = 400, description = "Unknown state token or bad pagination", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn list_owner_bookings<R, I, U>(
    State(service): State<Arc<BookingService<R, I, U>>>,
    SharerUserId(actor_id): SharerUserId,
    Query(params): Query<StateParams>,
) -> BookingResult<Json<Vec<Booking>>>
where
    R: BookingRepository,
    I: ItemGateway,
    U: UserGateway,
{
    let page = page_of(&params);
    let bookings = service
        .find_bookings(actor_id, BookingRole::Owner, params.state.as_deref(), page)
        .await?;
    Ok(Json(bookings))
}
