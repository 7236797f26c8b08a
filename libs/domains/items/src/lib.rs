//! Items Domain
//!
//! Things users share: an item has an owner, a name, a description, and
//! an availability flag. Owners patch their items, everyone searches the
//! available ones, and users who finished a booking may leave a comment.
//! Item views returned to the owner are decorated with the item's last
//! and next booking.
//!
//! The crate is self-contained: user names and booking decorations come
//! in through the [`ports::UserGateway`] and [`ports::BookingGateway`]
//! traits, wired by the application.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod ports;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ItemError, ItemResult};
pub use models::{
    BookingBrief, Comment, CreateComment, CreateItem, Item, ItemView, NewComment, UpdateItem,
};
pub use ports::{
    BookingGateway, InMemoryBookingGateway, InMemoryUserGateway, UserGateway, UserSummary,
};
pub use postgres::PgItemRepository;
pub use repository::{InMemoryItemRepository, ItemRepository};
pub use service::ItemService;
