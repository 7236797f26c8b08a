//! Cross-domain wiring.
//!
//! Domain crates only know their own port traits; these adapters implement
//! each port over another domain's PostgreSQL repository so the crates stay
//! decoupled at compile time.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use domain_bookings::{
    BookingRepository, Clock, PgBookingRepository, last_and_next,
};
use domain_items::{ItemRepository, PgItemRepository};
use domain_users::{PgUserRepository, UserRepository};

/// Items as the bookings domain sees them
pub struct BookingItemAdapter {
    items: PgItemRepository,
}

impl BookingItemAdapter {
    pub fn new(items: PgItemRepository) -> Self {
        Self { items }
    }
}

#[async_trait]
impl domain_bookings::ItemGateway for BookingItemAdapter {
    async fn find_item(
        &self,
        id: Uuid,
    ) -> domain_bookings::BookingResult<Option<domain_bookings::ItemSummary>> {
        let item = self
            .items
            .get_by_id(id)
            .await
            .map_err(|e| domain_bookings::BookingError::Internal(e.to_string()))?;

        Ok(item.map(|i| domain_bookings::ItemSummary {
            id: i.id,
            owner_id: i.owner_id,
            available: i.available,
        }))
    }
}

/// Users as the bookings domain sees them
pub struct BookingUserAdapter {
    users: PgUserRepository,
}

impl BookingUserAdapter {
    pub fn new(users: PgUserRepository) -> Self {
        Self { users }
    }
}

#[async_trait]
impl domain_bookings::UserGateway for BookingUserAdapter {
    async fn user_exists(&self, id: Uuid) -> domain_bookings::BookingResult<bool> {
        self.users
            .exists(id)
            .await
            .map_err(|e| domain_bookings::BookingError::Internal(e.to_string()))
    }
}

/// Users as the items domain sees them
pub struct ItemUserAdapter {
    users: PgUserRepository,
}

impl ItemUserAdapter {
    pub fn new(users: PgUserRepository) -> Self {
        Self { users }
    }
}

#[async_trait]
impl domain_items::UserGateway for ItemUserAdapter {
    async fn find_user(
        &self,
        id: Uuid,
    ) -> domain_items::ItemResult<Option<domain_items::UserSummary>> {
        let user = self
            .users
            .get_by_id(id)
            .await
            .map_err(|e| domain_items::ItemError::Internal(e.to_string()))?;

        Ok(user.map(|u| domain_items::UserSummary {
            id: u.id,
            name: u.name,
        }))
    }
}

/// Bookings as the items domain sees them.
///
/// The items domain asks time-free questions; this adapter samples the
/// clock once per call to answer them.
pub struct ItemBookingAdapter {
    bookings: PgBookingRepository,
    clock: Arc<dyn Clock>,
}

impl ItemBookingAdapter {
    pub fn new(bookings: PgBookingRepository, clock: Arc<dyn Clock>) -> Self {
        Self { bookings, clock }
    }
}

#[async_trait]
impl domain_items::BookingGateway for ItemBookingAdapter {
    async fn last_and_next(
        &self,
        item_id: Uuid,
    ) -> domain_items::ItemResult<(
        Option<domain_items::BookingBrief>,
        Option<domain_items::BookingBrief>,
    )> {
        let now = self.clock.now();
        let bookings = self
            .bookings
            .find_for_item(item_id)
            .await
            .map_err(|e| domain_items::ItemError::Internal(e.to_string()))?;

        let (last, next) = last_and_next(&bookings, now);
        let brief = |b: domain_bookings::Booking| domain_items::BookingBrief {
            id: b.id,
            booker_id: b.booker_id,
            start: b.start,
            end: b.end,
        };

        Ok((last.map(brief), next.map(brief)))
    }

    async fn has_completed_booking(
        &self,
        item_id: Uuid,
        user_id: Uuid,
    ) -> domain_items::ItemResult<bool> {
        self.bookings
            .exists_completed(item_id, user_id, self.clock.now())
            .await
            .map_err(|e| domain_items::ItemError::Internal(e.to_string()))
    }
}

/// Users as the requests domain sees them
pub struct RequestUserAdapter {
    users: PgUserRepository,
}

impl RequestUserAdapter {
    pub fn new(users: PgUserRepository) -> Self {
        Self { users }
    }
}

#[async_trait]
impl domain_requests::UserGateway for RequestUserAdapter {
    async fn user_exists(&self, id: Uuid) -> domain_requests::RequestResult<bool> {
        self.users
            .exists(id)
            .await
            .map_err(|e| domain_requests::RequestError::Internal(e.to_string()))
    }
}

/// Items as the requests domain sees them
pub struct RequestItemAdapter {
    items: PgItemRepository,
}

impl RequestItemAdapter {
    pub fn new(items: PgItemRepository) -> Self {
        Self { items }
    }
}

#[async_trait]
impl domain_requests::ItemAnswerGateway for RequestItemAdapter {
    async fn answers_for(
        &self,
        request_id: Uuid,
    ) -> domain_requests::RequestResult<Vec<domain_requests::ItemAnswer>> {
        let items = self
            .items
            .find_by_request(request_id)
            .await
            .map_err(|e| domain_requests::RequestError::Internal(e.to_string()))?;

        Ok(items
            .into_iter()
            .map(|i| domain_requests::ItemAnswer {
                id: i.id,
                name: i.name,
                owner_id: i.owner_id,
                available: i.available,
            })
            .collect())
    }
}
