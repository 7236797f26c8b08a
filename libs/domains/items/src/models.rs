use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A shareable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Unique identifier
    pub id: Uuid,
    /// The owning user (immutable after creation)
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    /// Whether the item can currently be booked
    pub available: bool,
    /// The item request this item answers, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
}

/// DTO for creating an item; the owner comes from the user header
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    pub available: bool,
    pub request_id: Option<Uuid>,
}

/// Partial update; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl Item {
    pub fn new(input: CreateItem, owner_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            owner_id,
            name: input.name,
            description: input.description,
            available: input.available,
            request_id: input.request_id,
        }
    }

    /// Apply a patch field-by-field
    pub fn apply_update(&mut self, input: UpdateItem) {
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(available) = input.available {
            self.available = available;
        }
    }
}

/// A user's remark on an item, allowed only after a completed booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub item_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

/// DTO for posting a comment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateComment {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}

/// Comment ready for persistence, author already resolved
#[derive(Debug, Clone)]
pub struct NewComment {
    pub item_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub text: String,
}

/// Just enough of a booking to decorate an item view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingBrief {
    pub id: Uuid,
    pub booker_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// An item as returned to viewers.
///
/// Comments are visible to everyone; the last/next booking decoration is
/// present only when the viewer owns the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemView {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
    pub last_booking: Option<BookingBrief>,
    pub next_booking: Option<BookingBrief>,
    pub comments: Vec<Comment>,
}

impl ItemView {
    pub fn new(
        item: Item,
        bookings: Option<(Option<BookingBrief>, Option<BookingBrief>)>,
        comments: Vec<Comment>,
    ) -> Self {
        let (last_booking, next_booking) = bookings.unwrap_or((None, None));
        Self {
            id: item.id,
            owner_id: item.owner_id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
            last_booking,
            next_booking,
            comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Item {
        Item::new(
            CreateItem {
                name: "Drill".to_string(),
                description: "Cordless".to_string(),
                available: true,
                request_id: None,
            },
            Uuid::now_v7(),
        )
    }

    #[test]
    fn apply_update_patches_only_present_fields() {
        let mut item = item();

        item.apply_update(UpdateItem {
            name: None,
            description: Some("Corded".to_string()),
            available: Some(false),
        });

        assert_eq!(item.name, "Drill");
        assert_eq!(item.description, "Corded");
        assert!(!item.available);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut patched = item();
        let original = patched.clone();

        patched.apply_update(UpdateItem::default());
        assert_eq!(patched, original);
    }

    #[test]
    fn view_without_decoration_has_no_booking_fields() {
        let view = ItemView::new(item(), None, vec![]);
        assert!(view.last_booking.is_none());
        assert!(view.next_booking.is_none());
    }
}
