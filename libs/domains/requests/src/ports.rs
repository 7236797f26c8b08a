use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::error::RequestResult;
use crate::models::ItemAnswer;

/// Read-only view of the users domain, wired by the application
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserGateway: Send + Sync {
    async fn user_exists(&self, id: Uuid) -> RequestResult<bool>;
}

/// Read-only view of the items domain, wired by the application
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ItemAnswerGateway: Send + Sync {
    /// The items created in answer to one request
    async fn answers_for(&self, request_id: Uuid) -> RequestResult<Vec<ItemAnswer>>;
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
    async fn user_exists(&self, id: Uuid) -> RequestResult<bool> {
        Ok(self.users.read().await.contains(&id))
    }
}

/// In-memory ItemAnswerGateway (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemAnswerGateway {
    answers: Arc<RwLock<HashMap<Uuid, Vec<ItemAnswer>>>>,
}

impl InMemoryItemAnswerGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_answer(&self, request_id: Uuid, answer: ItemAnswer) {
        self.answers
            .write()
            .await
            .entry(request_id)
            .or_default()
            .push(answer);
    }
}

#[async_trait]
impl ItemAnswerGateway for InMemoryItemAnswerGateway {
    async fn answers_for(&self, request_id: Uuid) -> RequestResult<Vec<ItemAnswer>> {
        Ok(self
            .answers
            .read()
            .await
            .get(&request_id)
            .cloned()
            .unwrap_or_default())
    }
}
