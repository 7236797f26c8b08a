//! Integration tests for the Users domain against PostgreSQL
//!
//! These spin up a real Postgres container and exercise the unique email
//! constraint the way production does.

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase};

#[tokio::test]
async fn create_get_update_delete_roundtrip() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let service = UserService::new(repo);
    let builder = TestDataBuilder::from_test_name("users_roundtrip");

    let user = service
        .create_user(CreateUser {
            name: "Alice".to_string(),
            email: builder.email("alice"),
        })
        .await
        .unwrap();

    let fetched = service.get_user(user.id).await.unwrap();
    assert_eq!(fetched.email, builder.email("alice"));

    let updated = service
        .update_user(
            user.id,
            UpdateUser {
                name: Some("Alicia".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Alicia");
    assert_eq!(updated.email, builder.email("alice"));

    service.delete_user(user.id).await.unwrap();
    assert!(matches!(
        service.get_user(user.id).await,
        Err(UserError::NotFound(_))
    ));
}

#[tokio::test]
async fn unique_email_enforced_by_database() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let service = UserService::new(repo);
    let builder = TestDataBuilder::from_test_name("users_unique_email");

    service
        .create_user(CreateUser {
            name: "Alice".to_string(),
            email: builder.email("taken"),
        })
        .await
        .unwrap();

    let result = service
        .create_user(CreateUser {
            name: "Impostor".to_string(),
            email: builder.email("taken"),
        })
        .await;

    assert!(matches!(result, Err(UserError::NotUniqueEmail(_))));
}

#[tokio::test]
async fn update_to_taken_email_conflicts() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let service = UserService::new(repo);
    let builder = TestDataBuilder::from_test_name("users_update_conflict");

    service
        .create_user(CreateUser {
            name: "Alice".to_string(),
            email: builder.email("alice"),
        })
        .await
        .unwrap();

    let bob = service
        .create_user(CreateUser {
            name: "Bob".to_string(),
            email: builder.email("bob"),
        })
        .await
        .unwrap();

    let result = service
        .update_user(
            bob.id,
            UpdateUser {
                name: None,
                email: Some(builder.email("alice")),
            },
        )
        .await;

    assert!(matches!(result, Err(UserError::NotUniqueEmail(_))));
}
