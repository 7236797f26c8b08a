use std::sync::Arc;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::{BookingError, BookingResult};
use crate::models::{
    Booking, BookingQuery, BookingRole, BookingState, BookingStatus, CreateBooking, Page,
};
use crate::ports::{ItemGateway, UserGateway};
use crate::repository::BookingRepository;

/// Service layer for Booking business logic.
///
/// Holds the injected clock; every operation samples it once and threads
/// the instant through repository filtering and classification.
#[derive(Clone)]
pub struct BookingService<R: BookingRepository, I: ItemGateway, U: UserGateway> {
    repository: Arc<R>,
    items: Arc<I>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<R: BookingRepository, I: ItemGateway, U: UserGateway> BookingService<R, I, U> {
    pub fn new(repository: R, items: I, users: U) -> Self {
        Self::with_clock(repository, items, users, Arc::new(SystemClock))
    }

    pub fn with_clock(repository: R, items: I, users: U, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository: Arc::new(repository),
            items: Arc::new(items),
            users: Arc::new(users),
            clock,
        }
    }

    /// Book an item for a time window; the booking starts WAITING.
    ///
    /// Preconditions are checked in a fixed order: the item exists, the
    /// booker is not its owner, the item is available, the booker exists,
    /// and the window is non-empty and not in the past.
    pub async fn create_booking(
        &self,
        booker_id: Uuid,
        input: CreateBooking,
    ) -> BookingResult<Booking> {
        let item = self
            .items
            .find_item(input.item_id)
            .await?
            .ok_or(BookingError::EntityNotFound {
                kind: "Item",
                id: input.item_id,
            })?;

        if item.owner_id == booker_id {
            return Err(BookingError::BookerIsOwner(booker_id));
        }

        if !item.available {
            return Err(BookingError::ItemNotAvailable(item.id));
        }

        if !self.users.user_exists(booker_id).await? {
            return Err(BookingError::EntityNotFound {
                kind: "User",
                id: booker_id,
            });
        }

        if input.end <= input.start || input.start < self.clock.now() {
            return Err(BookingError::IncorrectBookingDates);
        }

        self.repository.create(input, booker_id).await
    }

    /// Approve or reject a WAITING booking; only the item's owner may.
    ///
    /// Confirming to the status the booking already has is an error, so a
    /// repeated approve cannot silently succeed.
    pub async fn confirm_booking(
        &self,
        owner_id: Uuid,
        booking_id: Uuid,
        approved: bool,
    ) -> BookingResult<Booking> {
        let booking = self.get_existing(booking_id).await?;

        let item = self
            .items
            .find_item(booking.item_id)
            .await?
            .ok_or(BookingError::EntityNotFound {
                kind: "Item",
                id: booking.item_id,
            })?;

        if item.owner_id != owner_id {
            return Err(BookingError::WrongOwner(owner_id));
        }

        let target = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };
        if booking.status == target {
            return Err(BookingError::StatusAlreadyConfirmed(booking_id));
        }

        self.repository.update_status(booking_id, target).await
    }

    /// Get a booking; visible only to its booker or the item's owner
    pub async fn find_booking(&self, actor_id: Uuid, booking_id: Uuid) -> BookingResult<Booking> {
        let booking = self.get_existing(booking_id).await?;

        if booking.booker_id == actor_id {
            return Ok(booking);
        }

        let item = self
            .items
            .find_item(booking.item_id)
            .await?
            .ok_or(BookingError::EntityNotFound {
                kind: "Item",
                id: booking.item_id,
            })?;

        if item.owner_id != actor_id {
            return Err(BookingError::WrongOwner(actor_id));
        }

        Ok(booking)
    }

    /// State-filtered listing for a booker or an owner, newest start first
    pub async fn find_bookings(
        &self,
        actor_id: Uuid,
        role: BookingRole,
        state_token: Option<&str>,
        page: Option<Page>,
    ) -> BookingResult<Vec<Booking>> {
        if !self.users.user_exists(actor_id).await? {
            return Err(BookingError::EntityNotFound {
                kind: "User",
                id: actor_id,
            });
        }

        let state = match state_token {
            Some(token) => token.parse::<BookingState>()?,
            None => BookingState::All,
        };

        if let Some(page) = page {
            if page.size == 0 {
                return Err(BookingError::Validation(
                    "size must be greater than zero".to_string(),
                ));
            }
        }

        let now = self.clock.now();
        self.repository
            .find_by_query(
                BookingQuery {
                    actor_id,
                    role,
                    state,
                    page,
                },
                now,
            )
            .await
    }

    async fn get_existing(&self, booking_id: Uuid) -> BookingResult<Booking> {
        self.repository
            .get_by_id(booking_id)
            .await?
            .ok_or(BookingError::EntityNotFound {
                kind: "Booking",
                id: booking_id,
            })
    }
}
