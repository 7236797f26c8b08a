//! Integration tests for the Item Requests domain against PostgreSQL

use chrono::Utc;
use domain_requests::*;
use test_utils::TestDatabase;

#[tokio::test]
async fn create_and_fetch_roundtrip() {
    let db = TestDatabase::new().await;
    let repo = PgRequestRepository::new(db.connection());
    let asker = db.seed_user("Asker", "asker+roundtrip@example.com").await;

    let request = repo
        .create(
            CreateRequest {
                description: "need a drill".to_string(),
            },
            asker,
            Utc::now(),
        )
        .await
        .unwrap();

    let fetched = repo.get_by_id(request.id).await.unwrap().unwrap();
    assert_eq!(fetched, request);
}

#[tokio::test]
async fn listings_split_mine_from_others_newest_first() {
    let db = TestDatabase::new().await;
    let repo = PgRequestRepository::new(db.connection());
    let asker = db.seed_user("Asker", "asker+split@example.com").await;
    let other = db.seed_user("Other", "other+split@example.com").await;

    let mine_old = db.seed_request(asker, "need a drill").await;
    let mine_new = db.seed_request(asker, "need a saw").await;
    let theirs = db.seed_request(other, "need a ladder").await;

    let mine = repo.list_by_requestor(asker).await.unwrap();
    assert_eq!(
        mine.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![mine_new, mine_old]
    );

    let others = repo.list_others(asker, None).await.unwrap();
    assert_eq!(others.iter().map(|r| r.id).collect::<Vec<_>>(), vec![theirs]);
}

#[tokio::test]
async fn others_listing_paginates() {
    let db = TestDatabase::new().await;
    let repo = PgRequestRepository::new(db.connection());
    let asker = db.seed_user("Asker", "asker+paging@example.com").await;
    let other = db.seed_user("Other", "other+paging@example.com").await;

    db.seed_request(other, "first").await;
    let second = db.seed_request(other, "second").await;
    db.seed_request(other, "third").await;

    let windowed = repo
        .list_others(asker, Some(Page { from: 1, size: 1 }))
        .await
        .unwrap();

    // Newest first: third, second, first; the window lands on second
    assert_eq!(
        windowed.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![second]
    );
}
