use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::error::BookingResult;

/// What this crate needs to know about an item to book it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSummary {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub available: bool,
}

/// Read-only view of the items domain, wired by the application
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ItemGateway: Send + Sync {
    async fn find_item(&self, id: Uuid) -> BookingResult<Option<ItemSummary>>;
}

/// Read-only view of the users domain, wired by the application
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserGateway: Send + Sync {
    async fn user_exists(&self, id: Uuid) -> BookingResult<bool>;
}

/// In-memory ItemGateway (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemGateway {
    items: Arc<RwLock<HashMap<Uuid, ItemSummary>>>,
}

impl InMemoryItemGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, item: ItemSummary) {
        self.items.write().await.insert(item.id, item);
    }
}

#[async_trait]
impl ItemGateway for InMemoryItemGateway {
    async fn find_item(&self, id: Uuid) -> BookingResult<Option<ItemSummary>> {
        Ok(self.items.read().await.get(&id).copied())
    }
}

/// In-memory UserGateway (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserGateway {
    users: Arc<RwLock<HashSet<Uuid>>>,
}

impl InMemoryUserGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, id: Uuid) {
        self.users.write().await.insert(id);
    }
}

#[async_trait]
impl UserGateway for InMemoryUserGateway {
    async fn user_exists(&self, id: Uuid) -> BookingResult<bool> {
        Ok(self.users.read().await.contains(&id))
    }
}
