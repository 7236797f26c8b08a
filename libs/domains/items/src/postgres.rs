use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::{Condition, Expr, extension::postgres::PgExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{ItemError, ItemResult},
    models::{Comment, CreateItem, Item, NewComment},
    repository::ItemRepository,
};

/// PostgreSQL implementation of ItemRepository
#[derive(Clone)]
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn internal(err: sea_orm::DbErr) -> ItemError {
    ItemError::Internal(format!("Database error: {}", err))
}

fn comment_of(model: entity::comment::Model, author_name: String) -> Comment {
    Comment {
        id: model.id,
        text: model.text,
        item_id: model.item_id,
        author_id: model.author_id,
        author_name,
        created: model.created_at.into(),
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, input: CreateItem, owner_id: Uuid) -> ItemResult<Item> {
        let item = Item::new(input, owner_id);
        let active_model: entity::ActiveModel = item.into();

        let model = active_model.insert(&self.db).await.map_err(internal)?;

        tracing::info!(item_id = %model.id, owner_id = %owner_id, "Created item");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(|m| m.into()))
    }

    async fn update(&self, item: Item) -> ItemResult<Item> {
        let id = item.id;
        let active_model: entity::ActiveModel = item.into();

        let updated = active_model.update(&self.db).await.map_err(internal)?;

        tracing::info!(item_id = %id, "Updated item");
        Ok(updated.into())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> ItemResult<Vec<Item>> {
        let models = entity::Entity::find()
            .filter(entity::Column::OwnerId.eq(owner_id))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn search(&self, text: &str) -> ItemResult<Vec<Item>> {
        let pattern = format!("%{}%", text);

        let models = entity::Entity::find()
            .filter(entity::Column::Available.eq(true))
            .filter(
                Condition::any()
                    .add(Expr::col((entity::Entity, entity::Column::Name)).ilike(pattern.clone()))
                    .add(Expr::col((entity::Entity, entity::Column::Description)).ilike(pattern)),
            )
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_request(&self, request_id: Uuid) -> ItemResult<Vec<Item>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequestId.eq(request_id))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn add_comment(&self, comment: NewComment) -> ItemResult<Comment> {
        let author_name = comment.author_name.clone();
        let active_model = entity::comment::ActiveModel {
            id: Set(Uuid::now_v7()),
            text: Set(comment.text),
            item_id: Set(comment.item_id),
            author_id: Set(comment.author_id),
            created_at: Set(chrono::Utc::now().into()),
        };

        let model = active_model.insert(&self.db).await.map_err(internal)?;

        tracing::info!(comment_id = %model.id, item_id = %model.item_id, "Created comment");
        Ok(comment_of(model, author_name))
    }

    async fn comments_for(&self, item_id: Uuid) -> ItemResult<Vec<Comment>> {
        let rows = entity::comment::Entity::find()
            .filter(entity::comment::Column::ItemId.eq(item_id))
            .find_also_related(entity::user::Entity)
            .order_by_asc(entity::comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(rows
            .into_iter()
            .map(|(comment, author)| {
                let author_name = author.map(|a| a.name).unwrap_or_default();
                comment_of(comment, author_name)
            })
            .collect())
    }
}
