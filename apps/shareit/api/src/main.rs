//! ShareIt API - REST server over PostgreSQL

use axum::Router;
use axum_helpers::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::run_migrations;
use migration::Migrator;
use std::sync::Arc;
use tracing::info;

use domain_bookings::{BookingService, PgBookingRepository, SystemClock};
use domain_items::{ItemService, PgItemRepository};
use domain_requests::{PgRequestRepository, RequestService};
use domain_users::{PgUserRepository, UserService};

mod adapters;
mod config;
mod openapi;

use adapters::{
    BookingItemAdapter, BookingUserAdapter, ItemBookingAdapter, ItemUserAdapter,
    RequestItemAdapter, RequestUserAdapter,
};
use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = database::connect_from_config(config.postgres.clone()).await?;
    run_migrations::<Migrator>(&db, config.app.name).await?;

    let clock = Arc::new(SystemClock);

    let user_service = UserService::new(PgUserRepository::new(db.clone()));

    let item_service = ItemService::new(
        PgItemRepository::new(db.clone()),
        ItemUserAdapter::new(PgUserRepository::new(db.clone())),
        ItemBookingAdapter::new(PgBookingRepository::new(db.clone()), clock.clone()),
    );

    let booking_service = BookingService::with_clock(
        PgBookingRepository::new(db.clone()),
        BookingItemAdapter::new(PgItemRepository::new(db.clone())),
        BookingUserAdapter::new(PgUserRepository::new(db.clone())),
        clock,
    );

    let request_service = RequestService::new(
        PgRequestRepository::new(db.clone()),
        RequestUserAdapter::new(PgUserRepository::new(db.clone())),
        RequestItemAdapter::new(PgItemRepository::new(db.clone())),
    );

    let api_routes = Router::new()
        .nest("/users", domain_users::handlers::router(user_service))
        .nest("/items", domain_items::handlers::router(item_service))
        .nest("/bookings", domain_bookings::handlers::router(booking_service))
        .nest("/requests", domain_requests::handlers::router(request_service));

    let app = create_router::<openapi::ApiDoc>(api_routes).merge(health_router(config.app));

    info!("Starting ShareIt API on port {}", config.server.port);
    create_app(app, &config.server).await?;

    info!("ShareIt API shutdown complete");
    Ok(())
}
