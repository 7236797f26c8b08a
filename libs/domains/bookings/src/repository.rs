use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::error::{BookingError, BookingResult};
use crate::models::{Booking, BookingQuery, BookingRole, BookingStatus, CreateBooking};

/// Repository trait for Booking persistence.
///
/// Temporal filtering takes `now` as an argument so that a service
/// operation classifies every row against the same instant.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking in WAITING status
    async fn create(&self, input: CreateBooking, booker_id: Uuid) -> BookingResult<Booking>;

    /// Get a booking by ID
    async fn get_by_id(&self, id: Uuid) -> BookingResult<Option<Booking>>;

    /// Set a booking's status
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> BookingResult<Booking>;

    /// State-filtered listing for a booker or an owner, newest start first
    async fn find_by_query(
        &self,
        query: BookingQuery,
        now: DateTime<Utc>,
    ) -> BookingResult<Vec<Booking>>;

    /// All bookings of one item, newest start first
    async fn find_for_item(&self, item_id: Uuid) -> BookingResult<Vec<Booking>>;

    /// Whether `booker_id` has a booking of `item_id` that ended before `now`
    async fn exists_completed(
        &self,
        item_id: Uuid,
        booker_id: Uuid,
        now: DateTime<Utc>,
    ) -> BookingResult<bool>;
}

/// In-memory implementation of BookingRepository (for development/testing).
///
/// Owner-side queries need to know who owns each item, which lives in
/// another table in production. Tests register that mapping with
/// [`InMemoryBookingRepository::register_item`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryBookingRepository {
    bookings: Arc<RwLock<HashMap<Uuid, Booking>>>,
    item_owners: Arc<RwLock<HashMap<Uuid, Uuid>>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record which user owns an item, for owner-role filtering
    pub async fn register_item(&self, item_id: Uuid, owner_id: Uuid) {
        self.item_owners.write().await.insert(item_id, owner_id);
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, input: CreateBooking, booker_id: Uuid) -> BookingResult<Booking> {
        let booking = Booking {
            id: Uuid::now_v7(),
            item_id: input.item_id,
            booker_id,
            start: input.start,
            end: input.end,
            status: BookingStatus::Waiting,
        };

        self.bookings
            .write()
            .await
            .insert(booking.id, booking.clone());

        tracing::info!(booking_id = %booking.id, item_id = %booking.item_id, "Created booking");
        Ok(booking)
    }

    async fn get_by_id(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.get(&id).cloned())
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> BookingResult<Booking> {
        let mut bookings = self.bookings.write().await;

        let booking = bookings.get_mut(&id).ok_or(BookingError::EntityNotFound {
            kind: "Booking",
            id,
        })?;
        booking.status = status;

        tracing::info!(booking_id = %id, status = %status, "Updated booking status");
        Ok(booking.clone())
    }

    async fn find_by_query(
        &self,
        query: BookingQuery,
        now: DateTime<Utc>,
    ) -> BookingResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        let item_owners = self.item_owners.read().await;

        let mut result: Vec<Booking> = bookings
            .values()
            .filter(|b| match query.role {
                BookingRole::Booker => b.booker_id == query.actor_id,
                BookingRole::Owner => item_owners.get(&b.item_id) == Some(&query.actor_id),
            })
            .filter(|b| query.state.matches(b, now))
            .cloned()
            .collect();

        result.sort_by(|a, b| b.start.cmp(&a.start));

        if let Some(page) = query.page {
            result = result
                .into_iter()
                .skip(page.from as usize)
                .take(page.size as usize)
                .collect();
        }

        Ok(result)
    }

    async fn find_for_item(&self, item_id: Uuid) -> BookingResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;

        let mut result: Vec<Booking> = bookings
            .values()
            .filter(|b| b.item_id == item_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.start.cmp(&a.start));

        Ok(result)
    }

    async fn exists_completed(
        &self,
        item_id: Uuid,
        booker_id: Uuid,
        now: DateTime<Utc>,
    ) -> BookingResult<bool> {
        let bookings = self.bookings.read().await;

        Ok(bookings
            .values()
            .any(|b| b.item_id == item_id && b.booker_id == booker_id && b.end < now))
    }
}
