use axum::body::Body;
use axum::extract::{Query, RawQuery, State};
use axum::http::{HeaderMap, Method, Request};
use axum::response::Response;
use axum::routing::{get, patch, post};
use axum::Router;
use axum_helpers::{AppError, UuidPath, ValidatedJson};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::dtos::{
    CreateBooking, CreateComment, CreateItem, CreateRequest, CreateUser, ListingParams,
    UpdateItem, UpdateUser,
};
use crate::proxy::Proxy;

type GatewayResult = Result<Response, AppError>;

/// The full backend surface; validated writes and listings get explicit
/// handlers, the rest passes through untouched.
pub fn router(proxy: Proxy) -> Router {
    let proxy = Arc::new(proxy);

    Router::new()
        .route("/users", post(create_user).get(passthrough))
        .route(
            "/users/{id}",
            get(passthrough).patch(update_user).delete(passthrough),
        )
        .route("/items", post(create_item).get(passthrough))
        .route("/items/search", get(passthrough))
        .route("/items/{id}", get(passthrough).patch(update_item))
        .route("/items/{id}/comment", post(add_comment))
        .route("/bookings", post(create_booking).get(list_bookings))
        .route("/bookings/owner", get(list_owner_bookings))
        .route("/bookings/{id}", get(passthrough).patch(passthrough))
        .route("/requests", post(create_request).get(passthrough))
        .route("/requests/all", get(list_other_requests))
        .route("/requests/{id}", get(passthrough))
        .with_state(proxy)
}

async fn passthrough(State(proxy): State<Arc<Proxy>>, request: Request<Body>) -> GatewayResult {
    proxy.forward(request).await
}

async fn forward_validated<T: Serialize>(
    proxy: &Proxy,
    method: Method,
    path: String,
    headers: &HeaderMap,
    body: &T,
) -> GatewayResult {
    proxy.forward_json(method, &path, headers, body).await
}

async fn create_user(
    State(proxy): State<Arc<Proxy>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> GatewayResult {
    forward_validated(&proxy, Method::POST, "/users".to_string(), &headers, &input).await
}

async fn update_user(
    State(proxy): State<Arc<Proxy>>,
    UuidPath(id): UuidPath,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> GatewayResult {
    forward_validated(&proxy, Method::PATCH, format!("/users/{}", id), &headers, &input).await
}

async fn create_item(
    State(proxy): State<Arc<Proxy>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> GatewayResult {
    forward_validated(&proxy, Method::POST, "/items".to_string(), &headers, &input).await
}

async fn update_item(
    State(proxy): State<Arc<Proxy>>,
    UuidPath(id): UuidPath,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> GatewayResult {
    forward_validated(&proxy, Method::PATCH, format!("/items/{}", id), &headers, &input).await
}

async fn add_comment(
    State(proxy): State<Arc<Proxy>>,
    UuidPath(id): UuidPath,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateComment>,
) -> GatewayResult {
    forward_validated(
        &proxy,
        Method::POST,
        format!("/items/{}/comment", id),
        &headers,
        &input,
    )
    .await
}

async fn create_booking(
    State(proxy): State<Arc<Proxy>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateBooking>,
) -> GatewayResult {
    forward_validated(&proxy, Method::POST, "/bookings".to_string(), &headers, &input).await
}

async fn create_request(
    State(proxy): State<Arc<Proxy>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateRequest>,
) -> GatewayResult {
    forward_validated(&proxy, Method::POST, "/requests".to_string(), &headers, &input).await
}

async fn forward_listing(
    proxy: &Proxy,
    path: &str,
    params: ListingParams,
    raw_query: Option<String>,
    headers: HeaderMap,
) -> GatewayResult {
    params.validate().map_err(AppError::BadRequest)?;

    let path_and_query = match raw_query {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };

    let mut request = Request::builder()
        .method(Method::GET)
        .uri(path_and_query)
        .body(Body::empty())
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    *request.headers_mut() = headers;

    proxy.forward(request).await
}

async fn list_bookings(
    State(proxy): State<Arc<Proxy>>,
    headers: HeaderMap,
    Query(params): Query<ListingParams>,
    RawQuery(raw_query): RawQuery,
) -> GatewayResult {
    forward_listing(&proxy, "/bookings", params, raw_query, headers).await
}

async fn list_owner_bookings(
    State(proxy): State<Arc<Proxy>>,
    headers: HeaderMap,
    Query(params): Query<ListingParams>,
    RawQuery(raw_query): RawQuery,
) -> GatewayResult {
    forward_listing(&proxy, "/bookings/owner", params, raw_query, headers).await
}

async fn list_other_requests(
    State(proxy): State<Arc<Proxy>>,
    headers: HeaderMap,
    Query(params): Query<ListingParams>,
    RawQuery(raw_query): RawQuery,
) -> GatewayResult {
    forward_listing(&proxy, "/requests/all", params, raw_query, headers).await
}
