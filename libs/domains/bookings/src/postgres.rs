use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{BookingError, BookingResult},
    models::{Booking, BookingQuery, BookingRole, BookingState, BookingStatus, CreateBooking},
    repository::BookingRepository,
};

/// PostgreSQL implementation of BookingRepository
#[derive(Clone)]
pub struct PgBookingRepository {
    db: DatabaseConnection,
}

impl PgBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn internal(err: sea_orm::DbErr) -> BookingError {
    BookingError::Internal(format!("Database error: {}", err))
}

/// Translate a temporal state into a SQL condition over the booking columns
fn state_condition(state: BookingState, now: DateTime<Utc>) -> Condition {
    let now: sea_orm::prelude::DateTimeWithTimeZone = now.into();
    match state {
        BookingState::All => Condition::all(),
        BookingState::Past => Condition::all().add(entity::Column::EndDate.lt(now)),
        BookingState::Current => Condition::all()
            .add(entity::Column::StartDate.lt(now))
            .add(entity::Column::EndDate.gt(now)),
        BookingState::Future => Condition::all()
            .add(entity::Column::StartDate.gt(now))
            .add(entity::Column::Status.ne(BookingStatus::Rejected)),
        BookingState::Waiting => Condition::all().add(entity::Column::Status.eq(BookingStatus::Waiting)),
        BookingState::Rejected => {
            Condition::all().add(entity::Column::Status.eq(BookingStatus::Rejected))
        }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, input: CreateBooking, booker_id: Uuid) -> BookingResult<Booking> {
        let active_model = entity::Model::from_create(&input, booker_id);

        let model = active_model.insert(&self.db).await.map_err(internal)?;

        tracing::info!(booking_id = %model.id, item_id = %model.item_id, "Created booking");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(|m| m.into()))
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> BookingResult<Booking> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?
            .ok_or(BookingError::EntityNotFound {
                kind: "Booking",
                id,
            })?;

        let mut active_model: entity::ActiveModel = model.into();
        active_model.status = Set(status);

        let updated = active_model.update(&self.db).await.map_err(internal)?;

        tracing::info!(booking_id = %id, status = %status, "Updated booking status");
        Ok(updated.into())
    }

    async fn find_by_query(
        &self,
        query: BookingQuery,
        now: DateTime<Utc>,
    ) -> BookingResult<Vec<Booking>> {
        let mut select = entity::Entity::find();

        select = match query.role {
            BookingRole::Booker => select.filter(entity::Column::BookerId.eq(query.actor_id)),
            BookingRole::Owner => select
                .join(JoinType::InnerJoin, entity::Relation::Item.def())
                .filter(entity::item::Column::OwnerId.eq(query.actor_id)),
        };

        select = select
            .filter(state_condition(query.state, now))
            .order_by_desc(entity::Column::StartDate);

        if let Some(page) = query.page {
            select = select.offset(page.from).limit(page.size);
        }

        let models = select.all(&self.db).await.map_err(internal)?;
        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn find_for_item(&self, item_id: Uuid) -> BookingResult<Vec<Booking>> {
        let models = entity::Entity::find()
            .filter(entity::Column::ItemId.eq(item_id))
            .order_by_desc(entity::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn exists_completed(
        &self,
        item_id: Uuid,
        booker_id: Uuid,
        now: DateTime<Utc>,
    ) -> BookingResult<bool> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = now.into();

        let found = entity::Entity::find()
            .filter(entity::Column::ItemId.eq(item_id))
            .filter(entity::Column::BookerId.eq(booker_id))
            .filter(entity::Column::EndDate.lt(now))
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(found.is_some())
    }
}
