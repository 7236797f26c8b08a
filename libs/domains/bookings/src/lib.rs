//! Bookings Domain
//!
//! Time-window reservations of shared items: a booker asks for an item
//! over a `[start, end)` window, the item's owner approves or rejects, and
//! everyone can list their bookings filtered by a temporal state
//! (PAST / CURRENT / FUTURE / WAITING / REJECTED / ALL) computed against
//! an injected clock.
//!
//! The crate is self-contained: what it needs to know about items and
//! users comes in through the [`ports::ItemGateway`] and
//! [`ports::UserGateway`] traits, wired by the application.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_bookings::{handlers, repository::InMemoryBookingRepository, service::BookingService};
//!
//! let service = BookingService::new(repository, item_gateway, user_gateway);
//! let router = handlers::router(service);
//! ```

pub mod clock;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod ports;
pub mod postgres;
pub mod repository;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{BookingError, BookingResult};
pub use models::{
    Booking, BookingQuery, BookingRole, BookingState, BookingStatus, CreateBooking, Page,
    last_and_next,
};
pub use ports::{
    InMemoryItemGateway, InMemoryUserGateway, ItemGateway, ItemSummary, UserGateway,
};
pub use postgres::PgBookingRepository;
pub use repository::{BookingRepository, InMemoryBookingRepository};
pub use service::BookingService;
