//! # Axum Helpers
//!
//! Shared utilities for the workspace's Axum services.
//!
//! - **[`errors`]**: structured error responses (`AppError`, `ErrorResponse`)
//! - **[`extractors`]**: custom extractors (`SharerUserId`, `UuidPath`,
//!   `ValidatedJson`)
//! - **[`server`]**: router assembly, OpenAPI docs, health endpoint,
//!   graceful shutdown

pub mod errors;
pub mod extractors;
pub mod server;

pub use errors::{AppError, ErrorResponse};
pub use extractors::{SHARER_USER_ID_HEADER, SharerUserId, UuidPath, ValidatedJson};
pub use server::{create_app, create_router, health_router, shutdown_signal};
