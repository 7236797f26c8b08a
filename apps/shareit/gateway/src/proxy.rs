use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, header};
use axum::response::Response;
use axum_helpers::{AppError, SHARER_USER_ID_HEADER};
use serde::Serialize;

/// Request bodies larger than this are rejected before forwarding
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Forwards validated requests to the backing API verbatim.
///
/// The backend's status code and body pass through untouched; only the
/// user header and content type are copied from the incoming request.
#[derive(Clone)]
pub struct Proxy {
    client: reqwest::Client,
    backend_url: String,
}

impl Proxy {
    pub fn new(backend_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            backend_url,
        }
    }

    /// Forward a request whose body has already been validated and
    /// re-serialized
    pub async fn forward_json<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        headers: &HeaderMap,
        body: &T,
    ) -> Result<Response, AppError> {
        let payload = serde_json::to_vec(body)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        self.send(method, path, headers, Some(payload)).await
    }

    /// Forward a request as-is
    pub async fn forward(&self, request: Request<Body>) -> Result<Response, AppError> {
        let (parts, body) = request.into_parts();
        let path = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        let bytes = to_bytes(body, MAX_BODY_BYTES)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let payload = (!bytes.is_empty()).then(|| bytes.to_vec());

        self.send(parts.method, &path, &parts.headers, payload).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        headers: &HeaderMap,
        payload: Option<Vec<u8>>,
    ) -> Result<Response, AppError> {
        let url = format!("{}{}", self.backend_url, path);
        tracing::debug!(%method, %url, "Forwarding request");

        let mut request = self.client.request(method, &url);
        if let Some(user) = headers.get(SHARER_USER_ID_HEADER) {
            request = request.header(SHARER_USER_ID_HEADER, user);
        }
        if let Some(payload) = payload {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(payload);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ServiceUnavailable(format!("Backend unreachable: {}", e)))?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::ServiceUnavailable(format!("Backend read failed: {}", e)))?;

        let mut builder = Response::builder().status(status);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder
            .body(Body::from(bytes))
            .map_err(|e| AppError::InternalServerError(e.to_string()))
    }
}
