//! Integration tests for the Items domain against PostgreSQL
//!
//! These spin up a real Postgres container and exercise the ILIKE search
//! and the comment author-name join.

use chrono::{TimeZone, Utc};
use domain_items::*;
use test_utils::TestDatabase;

#[tokio::test]
async fn create_update_roundtrip() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());
    let owner = db.seed_user("Owner", "owner+items@example.com").await;

    let item = repo
        .create(
            CreateItem {
                name: "Drill".to_string(),
                description: "Cordless".to_string(),
                available: true,
                request_id: None,
            },
            owner,
        )
        .await
        .unwrap();

    let mut patched = repo.get_by_id(item.id).await.unwrap().unwrap();
    patched.apply_update(UpdateItem {
        name: None,
        description: None,
        available: Some(false),
    });
    let updated = repo.update(patched).await.unwrap();

    assert!(!updated.available);
    assert_eq!(updated.name, "Drill");
}

#[tokio::test]
async fn search_uses_ilike_on_name_and_description() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());
    let owner = db.seed_user("Owner", "owner+search@example.com").await;

    db.seed_item(owner, "Power DRILL", true).await;
    db.seed_item(owner, "Hammer", true).await;
    db.seed_item(owner, "drill press", false).await;

    let found = repo.search("drill").await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Power DRILL");
}

#[tokio::test]
async fn comments_join_the_author_name() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());
    let owner = db.seed_user("Owner", "owner+comments@example.com").await;
    let author = db.seed_user("Alice", "alice+comments@example.com").await;
    let item = db.seed_item(owner, "Drill", true).await;

    // The author must have a booking row for realistic data
    db.seed_booking(
        item,
        author,
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap(),
        "approved",
    )
    .await;

    repo.add_comment(NewComment {
        item_id: item,
        author_id: author,
        author_name: "Alice".to_string(),
        text: "Great drill".to_string(),
    })
    .await
    .unwrap();

    let comments = repo.comments_for(item).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author_name, "Alice");
    assert_eq!(comments[0].text, "Great drill");
}

#[tokio::test]
async fn find_by_request_returns_answering_items() {
    let db = TestDatabase::new().await;
    let repo = PgItemRepository::new(db.connection());
    let owner = db.seed_user("Owner", "owner+answers@example.com").await;
    let requester = db.seed_user("Asker", "asker+answers@example.com").await;
    let request = db.seed_request(requester, "Need a drill").await;

    let answer = repo
        .create(
            CreateItem {
                name: "Drill".to_string(),
                description: "Cordless".to_string(),
                available: true,
                request_id: Some(request),
            },
            owner,
        )
        .await
        .unwrap();
    db.seed_item(owner, "Unrelated", true).await;

    let answers = repo.find_by_request(request).await.unwrap();
    assert_eq!(answers.iter().map(|i| i.id).collect::<Vec<_>>(), vec![answer.id]);
}
