use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{ErrorResponse, SharerUserId, UuidPath, ValidatedJson};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::ItemResult;
use crate::models::{BookingBrief, Comment, CreateComment, CreateItem, Item, ItemView, UpdateItem};
use crate::ports::{BookingGateway, UserGateway};
use crate::repository::ItemRepository;
use crate::service::ItemService;

const TAG: &str = "items";

/// OpenAPI documentation for the Items API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_item,
        update_item,
        get_item,
        list_my_items,
        search_items,
        add_comment
    ),
    components(schemas(
        Item,
        ItemView,
        BookingBrief,
        Comment,
        CreateItem,
        UpdateItem,
        CreateComment,
        ErrorResponse
    )),
    tags(
        (name = TAG, description = "Shared item endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Debug, Deserialize, IntoParams)]
struct SearchParams {
    #[serde(default)]
    text: String,
}

/// Create the item router with all HTTP endpoints
pub fn router<R, U, B>(service: ItemService<R, U, B>) -> Router
where
    R: ItemRepository + 'static,
    U: UserGateway + 'static,
    B: BookingGateway + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_item).get(list_my_items))
        .route("/search", get(search_items))
        .route("/{id}", get(get_item).patch(update_item))
        .route("/{id}/comment", post(add_comment))
        .with_state(shared_service)
}

/// Register a new shareable item
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Owner not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_item<R, U, B>(
    State(service): State<Arc<ItemService<R, U, B>>>,
    SharerUserId(owner_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> ItemResult<impl IntoResponse>
where
    R: ItemRepository,
    U: UserGateway,
    B: BookingGateway,
{
    let item = service.create_item(owner_id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Patch an item (owner only)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Item not found or wrong owner", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn update_item<R, U, B>(
    State(service): State<Arc<ItemService<R, U, B>>>,
    SharerUserId(actor_id): SharerUserId,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> ItemResult<Json<Item>>
where
    R: ItemRepository,
    U: UserGateway,
    B: BookingGateway,
{
    let item = service.update_item(actor_id, id, input).await?;
    Ok(Json(item))
}

/// Get an item with comments; owners also get booking decoration
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemView),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_item<R, U, B>(
    State(service): State<Arc<ItemService<R, U, B>>>,
    SharerUserId(viewer_id): SharerUserId,
    UuidPath(id): UuidPath,
) -> ItemResult<Json<ItemView>>
where
    R: ItemRepository,
    U: UserGateway,
    B: BookingGateway,
{
    let view = service.find_item(id, viewer_id).await?;
    Ok(Json(view))
}

/// List the acting user's items, decorated, ordered by id
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "The owner's items", body = Vec<ItemView>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn list_my_items<R, U, B>(
    State(service): State<Arc<ItemService<R, U, B>>>,
    SharerUserId(owner_id): SharerUserId,
) -> ItemResult<Json<Vec<ItemView>>>
where
    R: ItemRepository,
    U: UserGateway,
    B: BookingGateway,
{
    let views = service.list_my_items(owner_id).await?;
    Ok(Json(views))
}

/// Search available items by name or description
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(SearchParams),
    responses(
        (status = 200, description = "Matching available items", body = Vec<Item>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn search_items<R, U, B>(
    State(service): State<Arc<ItemService<R, U, B>>>,
    Query(params): Query<SearchParams>,
) -> ItemResult<Json<Vec<Item>>>
where
    R: ItemRepository,
    U: UserGateway,
    B: BookingGateway,
{
    let items = service.search(&params.text).await?;
    Ok(Json(items))
}

/// Comment on an item after a completed booking
#[utoipa::path(
    post,
    path = "/{id}/comment",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body = CreateComment,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "No completed booking or empty text", body = ErrorResponse),
        (status = 404, description = "Item or author not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn add_comment<R, U, B>(
    State(service): State<Arc<ItemService<R, U, B>>>,
    SharerUserId(author_id): SharerUserId,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateComment>,
) -> ItemResult<impl IntoResponse>
where
    R: ItemRepository,
    U: UserGateway,
    B: BookingGateway,
{
    let comment = service.add_comment(author_id, id, input).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
