use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A user's ask for an item nobody has listed yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemRequest {
    /// Unique identifier
    pub id: Uuid,
    pub description: String,
    /// The asking user (immutable after creation)
    pub requestor_id: Uuid,
    pub created: DateTime<Utc>,
}

/// DTO for posting a request; the requestor comes from the user header
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRequest {
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
}

/// An item offered in answer to a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemAnswer {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub available: bool,
}

/// A request together with the items answering it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RequestWithAnswers {
    pub id: Uuid,
    pub description: String,
    pub requestor_id: Uuid,
    pub created: DateTime<Utc>,
    pub items: Vec<ItemAnswer>,
}

impl RequestWithAnswers {
    pub fn new(request: ItemRequest, items: Vec<ItemAnswer>) -> Self {
        Self {
            id: request.id,
            description: request.description,
            requestor_id: request.requestor_id,
            created: request.created,
            items,
        }
    }
}

/// Zero-based offset pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub from: u64,
    pub size: u64,
}

/// Raw query parameters for browsing other users' requests
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct PageParams {
    /// Zero-based offset; paginates only together with `size`
    pub from: Option<u64>,
    /// Page size; paginates only together with `from`
    pub size: Option<u64>,
}
