use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{Booking, BookingStatus, CreateBooking};

/// Sea-ORM entity for the bookings table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub item_id: Uuid,
    pub booker_id: Uuid,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub status: BookingStatus,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "item::Entity",
        from = "Column::ItemId",
        to = "item::Column::Id"
    )]
    Item,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Booking {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            item_id: model.item_id,
            booker_id: model.booker_id,
            start: model.start_date.into(),
            end: model.end_date.into(),
            status: model.status,
        }
    }
}

impl Model {
    pub fn from_create(input: &CreateBooking, booker_id: Uuid) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::now_v7()),
            item_id: Set(input.item_id),
            booker_id: Set(booker_id),
            start_date: Set(input.start.into()),
            end_date: Set(input.end.into()),
            status: Set(BookingStatus::Waiting),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}

/// Slim view of the items table, only what owner-side listing joins need
pub mod item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "items")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub owner_id: Uuid,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
