use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::error::ItemResult;
use crate::models::{Comment, CreateItem, Item, NewComment};

/// Repository trait for Item and Comment persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist a new item
    async fn create(&self, input: CreateItem, owner_id: Uuid) -> ItemResult<Item>;

    /// Get an item by ID
    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>>;

    /// Persist an already-patched item
    async fn update(&self, item: Item) -> ItemResult<Item>;

    /// All items of one owner, ordered by id
    async fn list_by_owner(&self, owner_id: Uuid) -> ItemResult<Vec<Item>>;

    /// Available items whose name or description contains `text`,
    /// case-insensitively
    async fn search(&self, text: &str) -> ItemResult<Vec<Item>>;

    /// Items answering one request
    async fn find_by_request(&self, request_id: Uuid) -> ItemResult<Vec<Item>>;

    /// Persist a comment
    async fn add_comment(&self, comment: NewComment) -> ItemResult<Comment>;

    /// An item's comments, oldest first
    async fn comments_for(&self, item_id: Uuid) -> ItemResult<Vec<Comment>>;
}

/// In-memory implementation of ItemRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<HashMap<Uuid, Item>>>,
    comments: Arc<RwLock<HashMap<Uuid, Comment>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, input: CreateItem, owner_id: Uuid) -> ItemResult<Item> {
        let item = Item::new(input, owner_id);
        self.items.write().await.insert(item.id, item.clone());

        tracing::info!(item_id = %item.id, owner_id = %owner_id, "Created item");
        Ok(item)
    }

    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn update(&self, item: Item) -> ItemResult<Item> {
        self.items.write().await.insert(item.id, item.clone());

        tracing::info!(item_id = %item.id, "Updated item");
        Ok(item)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;

        let mut result: Vec<Item> = items
            .values()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect();
        result.sort_by_key(|i| i.id);

        Ok(result)
    }

    async fn search(&self, text: &str) -> ItemResult<Vec<Item>> {
        let needle = text.to_lowercase();
        let items = self.items.read().await;

        let mut result: Vec<Item> = items
            .values()
            .filter(|i| i.available)
            .filter(|i| {
                i.name.to_lowercase().contains(&needle)
                    || i.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        result.sort_by_key(|i| i.id);

        Ok(result)
    }

    async fn find_by_request(&self, request_id: Uuid) -> ItemResult<Vec<Item>> {
        let items = self.items.read().await;

        let mut result: Vec<Item> = items
            .values()
            .filter(|i| i.request_id == Some(request_id))
            .cloned()
            .collect();
        result.sort_by_key(|i| i.id);

        Ok(result)
    }

    async fn add_comment(&self, comment: NewComment) -> ItemResult<Comment> {
        let comment = Comment {
            id: Uuid::now_v7(),
            text: comment.text,
            item_id: comment.item_id,
            author_id: comment.author_id,
            author_name: comment.author_name,
            created: chrono::Utc::now(),
        };
        self.comments
            .write()
            .await
            .insert(comment.id, comment.clone());

        tracing::info!(comment_id = %comment.id, item_id = %comment.item_id, "Created comment");
        Ok(comment)
    }

    async fn comments_for(&self, item_id: Uuid) -> ItemResult<Vec<Comment>> {
        let comments = self.comments.read().await;

        let mut result: Vec<Comment> = comments
            .values()
            .filter(|c| c.item_id == item_id)
            .cloned()
            .collect();
        result.sort_by_key(|c| c.created);

        Ok(result)
    }
}
