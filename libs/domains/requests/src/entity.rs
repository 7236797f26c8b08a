use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::ItemRequest;

/// Sea-ORM entity for the requests table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub description: String,
    pub requestor_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ItemRequest {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            requestor_id: model.requestor_id,
            created: model.created_at.into(),
        }
    }
}

impl From<ItemRequest> for ActiveModel {
    fn from(request: ItemRequest) -> Self {
        ActiveModel {
            id: Set(request.id),
            description: Set(request.description),
            requestor_id: Set(request.requestor_id),
            created_at: Set(request.created.into()),
        }
    }
}
