use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{ErrorResponse, SharerUserId, UuidPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::RequestResult;
use crate::models::{
    CreateRequest, ItemAnswer, ItemRequest, Page, PageParams, RequestWithAnswers,
};
use crate::ports::{ItemAnswerGateway, UserGateway};
use crate::repository::RequestRepository;
use crate::service::RequestService;

const TAG: &str = "requests";

/// OpenAPI documentation for the Item Requests API
#[derive(OpenApi)]
#[openapi(
    paths(create_request, my_requests, other_requests, get_request),
    components(schemas(
        ItemRequest,
        RequestWithAnswers,
        ItemAnswer,
        CreateRequest,
        ErrorResponse
    )),
    tags(
        (name = TAG, description = "Item request endpoints")
    )
)]
pub struct ApiDoc;

/// Create the request router with all HTTP endpoints
pub fn router<R, U, I>(service: RequestService<R, U, I>) -> Router
where
    R: RequestRepository + 'static,
    U: UserGateway + 'static,
    I: ItemAnswerGateway + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(my_requests).post(create_request))
        .route("/all", get(other_requests))
        .route("/{id}", get(get_request))
        .with_state(shared_service)
}

/// Paginates only when both bounds are present
fn page_of(params: &PageParams) -> Option<Page> {
    match (params.from, params.size) {
        (Some(from), Some(size)) => Some(Page { from, size }),
        _ => None,
    }
}

/// Post a request for an item nobody has listed
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created", body = ItemRequest),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Requestor not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_request<R, U, I>(
    State(service): State<Arc<RequestService<R, U, I>>>,
    SharerUserId(requestor_id): SharerUserId,
    ValidatedJson(input): ValidatedJson<CreateRequest>,
) -> RequestResult<impl IntoResponse>
where
    R: RequestRepository,
    U: UserGateway,
    I: ItemAnswerGateway,
{
    let request = service.create_request(requestor_id, input).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// List the acting user's requests with answers, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "The user's requests", body = Vec<RequestWithAnswers>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn my_requests<R, U, I>(
    State(service): State<Arc<RequestService<R, U, I>>>,
    SharerUserId(requestor_id): SharerUserId,
) -> RequestResult<Json<Vec<RequestWithAnswers>>>
where
    R: RequestRepository,
    U: UserGateway,
    I: ItemAnswerGateway,
{
    let requests = service.my_requests(requestor_id).await?;
    Ok(Json(requests))
}

/// Browse other users' requests, newest first
#[utoipa::path(
    get,
    path = "/all",
    tag = TAG,
    params(PageParams),
    responses(
        (status = 200, description = "Other users' requests", body = Vec<RequestWithAnswers>),
        (status = 400, description = "Bad pagination", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn other_requests<R, U, I>(
    State(service): State<Arc<RequestService<R, U, I>>>,
    SharerUserId(user_id): SharerUserId,
    Query(params): Query<PageParams>,
) -> RequestResult<Json<Vec<RequestWithAnswers>>>
where
    R: RequestRepository,
    U: UserGateway,
    I: ItemAnswerGateway,
{
    let requests = service.other_requests(user_id, page_of(&params)).await?;
    Ok(Json(requests))
}

/// Get one request with its answers
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request found", body = RequestWithAnswers),
        (status = 404, description = "Request or user not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_request<R, U, I>(
    State(service): State<Arc<RequestService<R, U, I>>>,
    SharerUserId(user_id): SharerUserId,
    UuidPath(id): UuidPath,
) -> RequestResult<Json<RequestWithAnswers>>
where
    R: RequestRepository,
    U: UserGateway,
    I: ItemAnswerGateway,
{
    let request = service.find_request(id, user_id).await?;
    Ok(Json(request))
}
