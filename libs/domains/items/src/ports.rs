use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::error::ItemResult;
use crate::models::BookingBrief;

/// What this crate needs to know about a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
}

/// Read-only view of the users domain, wired by the application
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserGateway: Send + Sync {
    async fn find_user(&self, id: Uuid) -> ItemResult<Option<UserSummary>>;
}

/// Read-only view of the bookings domain, wired by the application.
///
/// The adapter picks its own reference instant per call, so this crate
/// stays free of clock concerns.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// The item's most recently started past booking and its soonest
    /// upcoming non-rejected one
    async fn last_and_next(
        &self,
        item_id: Uuid,
    ) -> ItemResult<(Option<BookingBrief>, Option<BookingBrief>)>;

    /// Whether `user_id` has a booking of `item_id` that already ended
    async fn has_completed_booking(&self, item_id: Uuid, user_id: Uuid) -> ItemResult<bool>;
}

/// In-memory UserGateway (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserGateway {
    users: Arc<RwLock<HashMap<Uuid, UserSummary>>>,
}

impl InMemoryUserGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, id: Uuid, name: &str) {
        self.users.write().await.insert(
            id,
            UserSummary {
                id,
                name: name.to_string(),
            },
        );
    }
}

#[async_trait]
impl UserGateway for InMemoryUserGateway {
    async fn find_user(&self, id: Uuid) -> ItemResult<Option<UserSummary>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

/// In-memory BookingGateway (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryBookingGateway {
    decorations: Arc<RwLock<HashMap<Uuid, (Option<BookingBrief>, Option<BookingBrief>)>>>,
    completed: Arc<RwLock<HashSet<(Uuid, Uuid)>>>,
}

impl InMemoryBookingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_decoration(
        &self,
        item_id: Uuid,
        last: Option<BookingBrief>,
        next: Option<BookingBrief>,
    ) {
        self.decorations.write().await.insert(item_id, (last, next));
    }

    pub async fn mark_completed(&self, item_id: Uuid, user_id: Uuid) {
        self.completed.write().await.insert((item_id, user_id));
    }
}

#[async_trait]
impl BookingGateway for InMemoryBookingGateway {
    async fn last_and_next(
        &self,
        item_id: Uuid,
    ) -> ItemResult<(Option<BookingBrief>, Option<BookingBrief>)> {
        Ok(self
            .decorations
            .read()
            .await
            .get(&item_id)
            .copied()
            .unwrap_or((None, None)))
    }

    async fn has_completed_booking(&self, item_id: Uuid, user_id: Uuid) -> ItemResult<bool> {
        Ok(self.completed.read().await.contains(&(item_id, user_id)))
    }
}
