//! Item Requests Domain
//!
//! A user who cannot find what they need posts a request describing it.
//! Other users answer by creating items that reference the request.
//! Requesters see their own requests with answers newest-first; everyone
//! else browses the rest, optionally paginated.
//!
//! The crate is self-contained: user existence and answering items come
//! in through the [`ports::UserGateway`] and [`ports::ItemAnswerGateway`]
//! traits, wired by the application.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod ports;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{RequestError, RequestResult};
pub use models::{CreateRequest, ItemAnswer, ItemRequest, Page, RequestWithAnswers};
pub use ports::{
    InMemoryItemAnswerGateway, InMemoryUserGateway, ItemAnswerGateway, UserGateway,
};
pub use postgres::PgRequestRepository;
pub use repository::{InMemoryRequestRepository, RequestRepository};
pub use service::RequestService;
