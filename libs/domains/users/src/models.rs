use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A registered user of the sharing service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address (unique across all users)
    pub email: String,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

/// DTO for registering a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

/// DTO for patching an existing user; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

impl User {
    pub fn new(input: CreateUser) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            created_at: Utc::now(),
        }
    }

    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_update_patches_only_present_fields() {
        let mut user = User::new(CreateUser {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        });

        user.apply_update(UpdateUser {
            name: Some("Alicia".to_string()),
            email: None,
        });

        assert_eq!(user.name, "Alicia");
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn create_user_validation_rejects_bad_email() {
        let input = CreateUser {
            name: "Bob".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(input.validate().is_err());
    }
}
