use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{Comment, CreateComment, CreateItem, Item, ItemView, NewComment, UpdateItem};
use crate::ports::{BookingGateway, UserGateway};
use crate::repository::ItemRepository;

/// Service layer for Item business logic
#[derive(Clone)]
pub struct ItemService<R: ItemRepository, U: UserGateway, B: BookingGateway> {
    repository: Arc<R>,
    users: Arc<U>,
    bookings: Arc<B>,
}

impl<R: ItemRepository, U: UserGateway, B: BookingGateway> ItemService<R, U, B> {
    pub fn new(repository: R, users: U, bookings: B) -> Self {
        Self {
            repository: Arc::new(repository),
            users: Arc::new(users),
            bookings: Arc::new(bookings),
        }
    }

    pub async fn create_item(&self, owner_id: Uuid, input: CreateItem) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        if self.users.find_user(owner_id).await?.is_none() {
            return Err(ItemError::UserNotFound(owner_id));
        }

        self.repository.create(input, owner_id).await
    }

    /// Patch an item; only its owner may
    pub async fn update_item(
        &self,
        actor_id: Uuid,
        item_id: Uuid,
        input: UpdateItem,
    ) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        let mut item = self.get_existing(item_id).await?;

        if item.owner_id != actor_id {
            return Err(ItemError::WrongOwner(actor_id));
        }

        item.apply_update(input);
        self.repository.update(item).await
    }

    /// Get an item with its comments; owners also see the last and next
    /// booking of the item.
    pub async fn find_item(&self, item_id: Uuid, viewer_id: Uuid) -> ItemResult<ItemView> {
        let item = self.get_existing(item_id).await?;
        let comments = self.repository.comments_for(item_id).await?;

        let decoration = if item.owner_id == viewer_id {
            Some(self.bookings.last_and_next(item_id).await?)
        } else {
            None
        };

        Ok(ItemView::new(item, decoration, comments))
    }

    /// All the owner's items ordered by id, each decorated
    pub async fn list_my_items(&self, owner_id: Uuid) -> ItemResult<Vec<ItemView>> {
        if self.users.find_user(owner_id).await?.is_none() {
            return Err(ItemError::UserNotFound(owner_id));
        }

        let items = self.repository.list_by_owner(owner_id).await?;

        let mut views = Vec::with_capacity(items.len());
        for item in items {
            let comments = self.repository.comments_for(item.id).await?;
            let decoration = self.bookings.last_and_next(item.id).await?;
            views.push(ItemView::new(item, Some(decoration), comments));
        }

        Ok(views)
    }

    /// Search available items; blank text is an empty result, not an error
    pub async fn search(&self, text: &str) -> ItemResult<Vec<Item>> {
        if text.trim().is_empty() {
            return Ok(vec![]);
        }

        self.repository.search(text).await
    }

    /// Post a comment; the author must have a booking of this item that
    /// already ended.
    pub async fn add_comment(
        &self,
        author_id: Uuid,
        item_id: Uuid,
        input: CreateComment,
    ) -> ItemResult<Comment> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        self.get_existing(item_id).await?;

        let author = self
            .users
            .find_user(author_id)
            .await?
            .ok_or(ItemError::UserNotFound(author_id))?;

        if !self
            .bookings
            .has_completed_booking(item_id, author_id)
            .await?
        {
            return Err(ItemError::CommentWithoutBooking);
        }

        self.repository
            .add_comment(NewComment {
                item_id,
                author_id,
                author_name: author.name,
                text: input.text,
            })
            .await
    }

    async fn get_existing(&self, item_id: Uuid) -> ItemResult<Item> {
        self.repository
            .get_by_id(item_id)
            .await?
            .ok_or(ItemError::ItemNotFound(item_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingBrief;
    use crate::ports::{MockBookingGateway, MockUserGateway, UserSummary};
    use crate::repository::MockItemRepository;
    use chrono::{TimeZone, Utc};

    fn sample_item(owner_id: Uuid) -> Item {
        Item {
            id: Uuid::now_v7(),
            owner_id,
            name: "Drill".to_string(),
            description: "Cordless".to_string(),
            available: true,
            request_id: None,
        }
    }

    fn known_user(users: &mut MockUserGateway) {
        users.expect_find_user().returning(|queried| {
            Ok(Some(UserSummary {
                id: queried,
                name: "Alice".to_string(),
            }))
        });
    }

    #[tokio::test]
    async fn create_item_for_unknown_owner_is_not_found() {
        let mut users = MockUserGateway::new();
        users.expect_find_user().returning(|_| Ok(None));

        let svc = ItemService::new(MockItemRepository::new(), users, MockBookingGateway::new());
        let result = svc
            .create_item(
                Uuid::now_v7(),
                CreateItem {
                    name: "Drill".to_string(),
                    description: "Cordless".to_string(),
                    available: true,
                    request_id: None,
                },
            )
            .await;

        assert!(matches!(result, Err(ItemError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn only_the_owner_may_update() {
        let owner = Uuid::now_v7();
        let item = sample_item(owner);

        let mut repo = MockItemRepository::new();
        let returned = item.clone();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(returned.clone())));

        let svc = ItemService::new(repo, MockUserGateway::new(), MockBookingGateway::new());
        let result = svc
            .update_item(
                Uuid::now_v7(),
                item.id,
                UpdateItem {
                    available: Some(false),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ItemError::WrongOwner(_))));
    }

    #[tokio::test]
    async fn update_applies_the_patch_before_saving() {
        let owner = Uuid::now_v7();
        let item = sample_item(owner);

        let mut repo = MockItemRepository::new();
        let returned = item.clone();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(returned.clone())));
        repo.expect_update()
            .withf(|saved| !saved.available && saved.name == "Drill")
            .returning(|saved| Ok(saved));

        let svc = ItemService::new(repo, MockUserGateway::new(), MockBookingGateway::new());
        let updated = svc
            .update_item(
                owner,
                item.id,
                UpdateItem {
                    available: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(!updated.available);
    }

    #[tokio::test]
    async fn owner_view_is_decorated_with_bookings() {
        let owner = Uuid::now_v7();
        let item = sample_item(owner);

        let mut repo = MockItemRepository::new();
        let returned = item.clone();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(returned.clone())));
        repo.expect_comments_for().returning(|_| Ok(vec![]));

        let last = BookingBrief {
            id: Uuid::now_v7(),
            booker_id: Uuid::now_v7(),
            start: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap(),
        };
        let mut bookings = MockBookingGateway::new();
        bookings
            .expect_last_and_next()
            .returning(move |_| Ok((Some(last), None)));

        let svc = ItemService::new(repo, MockUserGateway::new(), bookings);
        let view = svc.find_item(item.id, owner).await.unwrap();

        assert_eq!(view.last_booking, Some(last));
        assert!(view.next_booking.is_none());
    }

    #[tokio::test]
    async fn stranger_view_is_not_decorated() {
        let item = sample_item(Uuid::now_v7());

        let mut repo = MockItemRepository::new();
        let returned = item.clone();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(returned.clone())));
        repo.expect_comments_for().returning(|_| Ok(vec![]));

        // No booking gateway expectations: the stranger path must not consult it
        let svc = ItemService::new(repo, MockUserGateway::new(), MockBookingGateway::new());
        let view = svc.find_item(item.id, Uuid::now_v7()).await.unwrap();

        assert!(view.last_booking.is_none());
        assert!(view.next_booking.is_none());
    }

    #[tokio::test]
    async fn blank_search_is_empty_without_touching_the_repository() {
        let svc = ItemService::new(
            MockItemRepository::new(),
            MockUserGateway::new(),
            MockBookingGateway::new(),
        );

        assert!(svc.search("").await.unwrap().is_empty());
        assert!(svc.search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn comment_without_completed_booking_is_rejected() {
        let item = sample_item(Uuid::now_v7());

        let mut repo = MockItemRepository::new();
        let returned = item.clone();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(returned.clone())));

        let mut users = MockUserGateway::new();
        known_user(&mut users);

        let mut bookings = MockBookingGateway::new();
        bookings
            .expect_has_completed_booking()
            .returning(|_, _| Ok(false));

        let svc = ItemService::new(repo, users, bookings);
        let result = svc
            .add_comment(
                Uuid::now_v7(),
                item.id,
                CreateComment {
                    text: "Great drill".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(ItemError::CommentWithoutBooking)));
    }

    #[tokio::test]
    async fn comment_carries_the_resolved_author_name() {
        let item = sample_item(Uuid::now_v7());
        let author = Uuid::now_v7();

        let mut repo = MockItemRepository::new();
        let returned = item.clone();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(returned.clone())));
        repo.expect_add_comment()
            .withf(|new| new.author_name == "Alice")
            .returning(|new| {
                Ok(Comment {
                    id: Uuid::now_v7(),
                    text: new.text,
                    item_id: new.item_id,
                    author_id: new.author_id,
                    author_name: new.author_name,
                    created: Utc::now(),
                })
            });

        let mut users = MockUserGateway::new();
        known_user(&mut users);

        let mut bookings = MockBookingGateway::new();
        bookings
            .expect_has_completed_booking()
            .returning(|_, _| Ok(true));

        let svc = ItemService::new(repo, users, bookings);
        let comment = svc
            .add_comment(
                author,
                item.id,
                CreateComment {
                    text: "Great drill".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(comment.author_name, "Alice");
        assert_eq!(comment.author_id, author);
    }
}
