use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::Display;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::BookingError;

/// Lifecycle status of a booking.
///
/// Created WAITING; the owner moves it to APPROVED or REJECTED exactly
/// once per confirm call. Re-confirming to the current status is an error,
/// not a no-op.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booking_status")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum BookingStatus {
    #[default]
    #[sea_orm(string_value = "waiting")]
    Waiting,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// A reservation of an item over a time window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    /// Unique identifier
    pub id: Uuid,
    /// The booked item (immutable after creation)
    pub item_id: Uuid,
    /// The user who booked it (immutable after creation)
    pub booker_id: Uuid,
    /// Window start
    pub start: DateTime<Utc>,
    /// Window end (strictly after start)
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
}

/// DTO for creating a booking; the booker comes from the user header
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub item_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Whose bookings a listing is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRole {
    /// Bookings made by the actor
    Booker,
    /// Bookings of items the actor owns
    Owner,
}

/// Temporal state filter, evaluated against a single reference instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingState {
    #[default]
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl FromStr for BookingState {
    type Err = BookingError;

    /// Parse a state token; an unrecognized token is a typed error, never a
    /// silent empty result.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            other => Err(BookingError::UnknownState(other.to_string())),
        }
    }
}

impl BookingState {
    /// Whether `booking` falls under this state at instant `now`
    pub fn matches(&self, booking: &Booking, now: DateTime<Utc>) -> bool {
        match self {
            BookingState::All => true,
            BookingState::Past => booking.end < now,
            BookingState::Current => booking.start < now && booking.end > now,
            BookingState::Future => {
                booking.start > now && booking.status != BookingStatus::Rejected
            }
            BookingState::Waiting => booking.status == BookingStatus::Waiting,
            BookingState::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

/// Zero-based offset pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub from: u64,
    pub size: u64,
}

/// Parameters for a state-filtered booking listing
#[derive(Debug, Clone)]
pub struct BookingQuery {
    pub actor_id: Uuid,
    pub role: BookingRole,
    pub state: BookingState,
    pub page: Option<Page>,
}

/// Raw query parameters for booking listings
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct StateParams {
    /// State filter token (defaults to ALL)
    pub state: Option<String>,
    /// Zero-based offset; paginates only together with `size`
    pub from: Option<u64>,
    /// Page size; paginates only together with `from`
    pub size: Option<u64>,
}

/// Resolve an item's last and next booking relative to `now`.
///
/// - last: latest `start` strictly before `now`, any status
/// - next: earliest `start` strictly after `now`, rejected excluded
///
/// An item with no qualifying bookings yields `None` on that side.
pub fn last_and_next(bookings: &[Booking], now: DateTime<Utc>) -> (Option<Booking>, Option<Booking>) {
    let last = bookings
        .iter()
        .filter(|b| b.start < now)
        .max_by_key(|b| b.start)
        .cloned();

    let next = bookings
        .iter()
        .filter(|b| b.start > now && b.status != BookingStatus::Rejected)
        .min_by_key(|b| b.start)
        .cloned();

    (last, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()
    }

    fn booking(start_year: i32, end_year: i32, status: BookingStatus) -> Booking {
        Booking {
            id: Uuid::now_v7(),
            item_id: Uuid::now_v7(),
            booker_id: Uuid::now_v7(),
            start: at(start_year),
            end: at(end_year),
            status,
        }
    }

    #[test]
    fn state_tokens_parse() {
        assert_eq!("ALL".parse::<BookingState>().unwrap(), BookingState::All);
        assert_eq!("PAST".parse::<BookingState>().unwrap(), BookingState::Past);
        assert_eq!(
            "REJECTED".parse::<BookingState>().unwrap(),
            BookingState::Rejected
        );
    }

    #[test]
    fn unknown_state_token_is_an_error_with_the_token_in_the_message() {
        let err = "UNSUPPORTED_STATUS".parse::<BookingState>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown state: UNSUPPORTED_STATUS");

        let err = "FOO".parse::<BookingState>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown state: FOO");
    }

    #[test]
    fn lowercase_token_is_rejected() {
        assert!("all".parse::<BookingState>().is_err());
    }

    #[test]
    fn past_and_current_are_mutually_exclusive() {
        let now = at(2023);

        let ended = booking(2020, 2021, BookingStatus::Approved);
        assert!(BookingState::Past.matches(&ended, now));
        assert!(!BookingState::Current.matches(&ended, now));

        let running = booking(2022, 2024, BookingStatus::Approved);
        assert!(BookingState::Current.matches(&running, now));
        assert!(!BookingState::Past.matches(&running, now));
    }

    #[test]
    fn future_excludes_rejected() {
        let now = at(2023);

        let upcoming = booking(2024, 2025, BookingStatus::Waiting);
        assert!(BookingState::Future.matches(&upcoming, now));

        let rejected = booking(2024, 2025, BookingStatus::Rejected);
        assert!(!BookingState::Future.matches(&rejected, now));
        assert!(BookingState::Rejected.matches(&rejected, now));
    }

    #[test]
    fn all_matches_everything() {
        let now = at(2023);
        for b in [
            booking(2000, 2001, BookingStatus::Approved),
            booking(2024, 2030, BookingStatus::Rejected),
            booking(2022, 2024, BookingStatus::Waiting),
        ] {
            assert!(BookingState::All.matches(&b, now));
        }
    }

    #[test]
    fn last_and_next_picks_latest_past_start_and_earliest_upcoming_non_rejected() {
        let now = at(2023);
        let old = booking(2000, 2001, BookingStatus::Approved);
        let waiting = booking(2024, 2025, BookingStatus::Waiting);
        let rejected = booking(2030, 2031, BookingStatus::Rejected);
        let approved = booking(2029, 2032, BookingStatus::Approved);

        let all = vec![
            old.clone(),
            waiting.clone(),
            rejected.clone(),
            approved.clone(),
        ];

        let (last, next) = last_and_next(&all, now);
        assert_eq!(last.unwrap().id, old.id);
        // 2024 WAITING starts sooner than 2029 APPROVED and is not rejected
        assert_eq!(next.unwrap().id, waiting.id);
    }

    #[test]
    fn last_and_next_fixture_with_only_approved_upcoming() {
        let now = at(2023);
        let old = booking(2000, 2001, BookingStatus::Approved);
        let rejected = booking(2024, 2025, BookingStatus::Rejected);
        let approved = booking(2029, 2032, BookingStatus::Approved);

        let (last, next) = last_and_next(&[old.clone(), rejected, approved.clone()], now);
        assert_eq!(last.unwrap().id, old.id);
        assert_eq!(next.unwrap().id, approved.id);
    }

    #[test]
    fn last_and_next_with_no_bookings_is_none_not_an_error() {
        let (last, next) = last_and_next(&[], at(2023));
        assert!(last.is_none());
        assert!(next.is_none());
    }

    #[test]
    fn booking_status_serializes_uppercase() {
        let json = serde_json::to_string(&BookingStatus::Waiting).unwrap();
        assert_eq!(json, "\"WAITING\"");
    }
}
