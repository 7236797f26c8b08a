use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{RequestError, RequestResult},
    models::{CreateRequest, ItemRequest, Page},
    repository::RequestRepository,
};

/// PostgreSQL implementation of RequestRepository
#[derive(Clone)]
pub struct PgRequestRepository {
    db: DatabaseConnection,
}

impl PgRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn internal(err: sea_orm::DbErr) -> RequestError {
    RequestError::Internal(format!("Database error: {}", err))
}

#[async_trait]
impl RequestRepository for PgRequestRepository {
    async fn create(
        &self,
        input: CreateRequest,
        requestor_id: Uuid,
        created: DateTime<Utc>,
    ) -> RequestResult<ItemRequest> {
        let active_model = entity::ActiveModel {
            id: Set(Uuid::now_v7()),
            description: Set(input.description),
            requestor_id: Set(requestor_id),
            created_at: Set(created.into()),
        };

        let model = active_model.insert(&self.db).await.map_err(internal)?;

        tracing::info!(request_id = %model.id, "Created item request");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> RequestResult<Option<ItemRequest>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(|m| m.into()))
    }

    async fn list_by_requestor(&self, requestor_id: Uuid) -> RequestResult<Vec<ItemRequest>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequestorId.eq(requestor_id))
            .order_by_desc(entity::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn list_others(
        &self,
        requestor_id: Uuid,
        page: Option<Page>,
    ) -> RequestResult<Vec<ItemRequest>> {
        let mut select = entity::Entity::find()
            .filter(entity::Column::RequestorId.ne(requestor_id))
            .order_by_desc(entity::Column::CreatedAt);

        if let Some(page) = page {
            select = select.offset(page.from).limit(page.size);
        }

        let models = select.all(&self.db).await.map_err(internal)?;
        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}
