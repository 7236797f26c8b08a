use utoipa::OpenApi;

/// Combined OpenAPI document for the ShareIt API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ShareIt API",
        description = "Share items with other users: list them, book them \
                       for a time window, answer item requests, and comment \
                       after a completed booking.",
        version = env!("CARGO_PKG_VERSION")
    ),
    nest(
        (path = "/users", api = domain_users::handlers::ApiDoc),
        (path = "/items", api = domain_items::handlers::ApiDoc),
        (path = "/bookings", api = domain_bookings::handlers::ApiDoc),
        (path = "/requests", api = domain_requests::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
