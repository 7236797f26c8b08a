//! Request shapes the gateway validates before forwarding.
//!
//! These mirror the backend's DTOs field-for-field; patch DTOs skip absent
//! fields on re-serialization so a forwarded PATCH stays a partial update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be valid"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "name must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(email(message = "email must be valid"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateItem {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct UpdateItem {
    #[validate(length(min = 1, message = "name must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateComment {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateBooking {
    pub item_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CreateRequest {
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
}

/// Listing query parameters shared by bookings and requests endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub state: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

const STATE_TOKENS: [&str; 6] = ["ALL", "CURRENT", "PAST", "FUTURE", "WAITING", "REJECTED"];

impl ListingParams {
    /// Reject unknown state tokens and out-of-range pagination before the
    /// request leaves the gateway
    pub fn validate(&self) -> Result<(), String> {
        if let Some(state) = &self.state {
            if !STATE_TOKENS.contains(&state.as_str()) {
                return Err(format!("Unknown state: {}", state));
            }
        }
        if let Some(from) = self.from {
            if from < 0 {
                return Err("from must not be negative".to_string());
            }
        }
        if let Some(size) = self.size {
            if size <= 0 {
                return Err("size must be greater than zero".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_params_accept_known_states_and_bounds() {
        let params = ListingParams {
            state: Some("FUTURE".to_string()),
            from: Some(0),
            size: Some(10),
        };
        assert!(params.validate().is_ok());
        assert!(ListingParams::default().validate().is_ok());
    }

    #[test]
    fn listing_params_reject_unknown_state() {
        let params = ListingParams {
            state: Some("UNSUPPORTED_STATUS".to_string()),
            ..Default::default()
        };
        assert_eq!(
            params.validate().unwrap_err(),
            "Unknown state: UNSUPPORTED_STATUS"
        );
    }

    #[test]
    fn listing_params_reject_bad_pagination() {
        let params = ListingParams {
            from: Some(-1),
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = ListingParams {
            size: Some(0),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn patch_dtos_skip_absent_fields() {
        let patch = UpdateUser {
            name: Some("Alice".to_string()),
            email: None,
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Alice" }));
    }
}
