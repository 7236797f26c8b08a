//! Handler tests for the Users domain
//!
//! These run against the in-memory repository, verifying request
//! deserialization, status codes, and error responses without a database.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    let service = UserService::new(InMemoryUserRepository::new());
    handlers::router(service)
}

fn create_request(name: &str, email: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "name": name, "email": email })).unwrap(),
        ))
        .unwrap()
}

#[tokio::test]
async fn create_user_returns_201() {
    let response = app()
        .oneshot(create_request("Alice", "alice@example.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let user: User = json_body(response.into_body()).await;
    assert_eq!(user.name, "Alice");
    assert_eq!(user.email, "alice@example.com");
}

#[tokio::test]
async fn create_user_with_invalid_email_returns_400() {
    let response = app()
        .oneshot(create_request("Alice", "not-an-email"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_email_returns_409() {
    let app = app();

    let response = app
        .clone()
        .oneshot(create_request("Alice", "alice@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(create_request("Impostor", "alice@example.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn get_unknown_user_returns_404() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri(format!("/{}", uuid::Uuid::now_v7()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_user_with_malformed_id_returns_400() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/definitely-not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_user_updates_name_only() {
    let app = app();

    let response = app
        .clone()
        .oneshot(create_request("Alice", "alice@example.com"))
        .await
        .unwrap();
    let user: User = json_body(response.into_body()).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/{}", user.id))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({ "name": "Alicia" })).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: User = json_body(response.into_body()).await;
    assert_eq!(updated.name, "Alicia");
    assert_eq!(updated.email, "alice@example.com");
}

#[tokio::test]
async fn delete_user_returns_204_then_404() {
    let app = app();

    let response = app
        .clone()
        .oneshot(create_request("Alice", "alice@example.com"))
        .await
        .unwrap();
    let user: User = json_body(response.into_body()).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/{}", user.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/{}", user.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
