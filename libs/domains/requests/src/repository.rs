use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::error::RequestResult;
use crate::models::{CreateRequest, ItemRequest, Page};

/// Repository trait for ItemRequest persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RequestRepository: Send + Sync {
    /// Persist a new request created at `created`
    async fn create(
        &self,
        input: CreateRequest,
        requestor_id: Uuid,
        created: DateTime<Utc>,
    ) -> RequestResult<ItemRequest>;

    /// Get a request by ID
    async fn get_by_id(&self, id: Uuid) -> RequestResult<Option<ItemRequest>>;

    /// One user's requests, newest first
    async fn list_by_requestor(&self, requestor_id: Uuid) -> RequestResult<Vec<ItemRequest>>;

    /// Everyone else's requests, newest first, optionally windowed
    async fn list_others(
        &self,
        requestor_id: Uuid,
        page: Option<Page>,
    ) -> RequestResult<Vec<ItemRequest>>;
}

/// In-memory implementation of RequestRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryRequestRepository {
    requests: Arc<RwLock<HashMap<Uuid, ItemRequest>>>,
}

impl InMemoryRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_newest_first(mut requests: Vec<ItemRequest>) -> Vec<ItemRequest> {
        requests.sort_by(|a, b| b.created.cmp(&a.created));
        requests
    }
}

#[async_trait]
impl RequestRepository for InMemoryRequestRepository {
    async fn create(
        &self,
        input: CreateRequest,
        requestor_id: Uuid,
        created: DateTime<Utc>,
    ) -> RequestResult<ItemRequest> {
        let request = ItemRequest {
            id: Uuid::now_v7(),
            description: input.description,
            requestor_id,
            created,
        };
        self.requests
            .write()
            .await
            .insert(request.id, request.clone());

        tracing::info!(request_id = %request.id, "Created item request");
        Ok(request)
    }

    async fn get_by_id(&self, id: Uuid) -> RequestResult<Option<ItemRequest>> {
        Ok(self.requests.read().await.get(&id).cloned())
    }

    async fn list_by_requestor(&self, requestor_id: Uuid) -> RequestResult<Vec<ItemRequest>> {
        let requests = self.requests.read().await;

        Ok(Self::sorted_newest_first(
            requests
                .values()
                .filter(|r| r.requestor_id == requestor_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_others(
        &self,
        requestor_id: Uuid,
        page: Option<Page>,
    ) -> RequestResult<Vec<ItemRequest>> {
        let requests = self.requests.read().await;

        let mut result = Self::sorted_newest_first(
            requests
                .values()
                .filter(|r| r.requestor_id != requestor_id)
                .cloned()
                .collect(),
        );

        if let Some(page) = page {
            result = result
                .into_iter()
                .skip(page.from as usize)
                .take(page.size as usize)
                .collect();
        }

        Ok(result)
    }
}
