//! Integration tests for the Bookings domain against PostgreSQL
//!
//! These spin up a real Postgres container and exercise the repository's
//! state filtering, the owner-side join, and the completed-booking probe.

use chrono::{DateTime, TimeZone, Utc};
use domain_bookings::*;
use test_utils::TestDatabase;
use uuid::Uuid;

fn at(year: i32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()
}

struct Seeded {
    repo: PgBookingRepository,
    owner: Uuid,
    booker: Uuid,
    item: Uuid,
}

async fn seeded(db: &TestDatabase, tag: &str) -> Seeded {
    let owner = db
        .seed_user("Owner", &format!("owner+{}@example.com", tag))
        .await;
    let booker = db
        .seed_user("Booker", &format!("booker+{}@example.com", tag))
        .await;
    let item = db.seed_item(owner, "Drill", true).await;

    Seeded {
        repo: PgBookingRepository::new(db.connection()),
        owner,
        booker,
        item,
    }
}

#[tokio::test]
async fn create_and_fetch_roundtrip() {
    let db = TestDatabase::new().await;
    let s = seeded(&db, "roundtrip").await;

    let booking = s
        .repo
        .create(
            CreateBooking {
                item_id: s.item,
                start: at(2030),
                end: at(2031),
            },
            s.booker,
        )
        .await
        .unwrap();

    assert_eq!(booking.status, BookingStatus::Waiting);

    let fetched = s.repo.get_by_id(booking.id).await.unwrap().unwrap();
    assert_eq!(fetched, booking);
}

#[tokio::test]
async fn update_status_persists() {
    let db = TestDatabase::new().await;
    let s = seeded(&db, "status").await;

    let id = db
        .seed_booking(s.item, s.booker, at(2030), at(2031), "waiting")
        .await;

    let updated = s
        .repo
        .update_status(id, BookingStatus::Approved)
        .await
        .unwrap();
    assert_eq!(updated.status, BookingStatus::Approved);

    let fetched = s.repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(fetched.status, BookingStatus::Approved);
}

#[tokio::test]
async fn state_filters_partition_the_timeline() {
    let db = TestDatabase::new().await;
    let s = seeded(&db, "states").await;
    let now = at(2023);

    let past = db
        .seed_booking(s.item, s.booker, at(2000), at(2001), "approved")
        .await;
    let current = db
        .seed_booking(s.item, s.booker, at(2022), at(2024), "approved")
        .await;
    let future = db
        .seed_booking(s.item, s.booker, at(2030), at(2031), "waiting")
        .await;
    let rejected = db
        .seed_booking(s.item, s.booker, at(2032), at(2033), "rejected")
        .await;

    let query = |state| BookingQuery {
        actor_id: s.booker,
        role: BookingRole::Booker,
        state,
        page: None,
    };

    let result = s
        .repo
        .find_by_query(query(BookingState::Past), now)
        .await
        .unwrap();
    assert_eq!(result.iter().map(|b| b.id).collect::<Vec<_>>(), vec![past]);

    let result = s
        .repo
        .find_by_query(query(BookingState::Current), now)
        .await
        .unwrap();
    assert_eq!(
        result.iter().map(|b| b.id).collect::<Vec<_>>(),
        vec![current]
    );

    // FUTURE excludes the rejected 2032 booking
    let result = s
        .repo
        .find_by_query(query(BookingState::Future), now)
        .await
        .unwrap();
    assert_eq!(result.iter().map(|b| b.id).collect::<Vec<_>>(), vec![future]);

    let result = s
        .repo
        .find_by_query(query(BookingState::Rejected), now)
        .await
        .unwrap();
    assert_eq!(
        result.iter().map(|b| b.id).collect::<Vec<_>>(),
        vec![rejected]
    );

    // ALL sorts newest start first
    let result = s
        .repo
        .find_by_query(query(BookingState::All), now)
        .await
        .unwrap();
    assert_eq!(
        result.iter().map(|b| b.id).collect::<Vec<_>>(),
        vec![rejected, future, current, past]
    );
}

#[tokio::test]
async fn owner_listing_joins_on_item_ownership() {
    let db = TestDatabase::new().await;
    let s = seeded(&db, "ownerjoin").await;

    // A booking of somebody else's item must not leak into the listing
    let other_owner = db
        .seed_user("Other", "other+ownerjoin@example.com")
        .await;
    let other_item = db.seed_item(other_owner, "Saw", true).await;
    db.seed_booking(other_item, s.booker, at(2030), at(2031), "waiting")
        .await;

    let mine = db
        .seed_booking(s.item, s.booker, at(2030), at(2031), "waiting")
        .await;

    let result = s
        .repo
        .find_by_query(
            BookingQuery {
                actor_id: s.owner,
                role: BookingRole::Owner,
                state: BookingState::All,
                page: None,
            },
            at(2023),
        )
        .await
        .unwrap();

    assert_eq!(result.iter().map(|b| b.id).collect::<Vec<_>>(), vec![mine]);
}

#[tokio::test]
async fn pagination_windows_the_sorted_listing() {
    let db = TestDatabase::new().await;
    let s = seeded(&db, "paging").await;

    for year in [2030, 2032, 2034] {
        db.seed_booking(s.item, s.booker, at(year), at(year + 1), "waiting")
            .await;
    }

    let result = s
        .repo
        .find_by_query(
            BookingQuery {
                actor_id: s.booker,
                role: BookingRole::Booker,
                state: BookingState::All,
                page: Some(Page { from: 1, size: 1 }),
            },
            at(2023),
        )
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].start, at(2032));
}

#[tokio::test]
async fn exists_completed_sees_only_ended_bookings() {
    let db = TestDatabase::new().await;
    let s = seeded(&db, "completed").await;

    db.seed_booking(s.item, s.booker, at(2000), at(2001), "approved")
        .await;

    assert!(
        s.repo
            .exists_completed(s.item, s.booker, at(2023))
            .await
            .unwrap()
    );
    assert!(
        !s.repo
            .exists_completed(s.item, s.booker, at(2000))
            .await
            .unwrap()
    );
    assert!(
        !s.repo
            .exists_completed(s.item, s.owner, at(2023))
            .await
            .unwrap()
    );
}
