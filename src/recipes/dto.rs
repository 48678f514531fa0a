use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::dto::PublicUser;
use crate::error::ApiError;
use crate::recipes::repo::RecipeWithOwner;

/// Minimum instructions length accepted at the boundary.
pub const MIN_INSTRUCTIONS_LEN: usize = 50;

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<i32>,
}

impl CreateRecipeRequest {
    /// Boundary validation; runs before any store mutation.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.is_empty() || self.instructions.chars().count() < MIN_INSTRUCTIONS_LEN {
            return Err(ApiError::Validation(
                "Title and instructions are required, and instructions must be at least 50 characters long"
                    .into(),
            ));
        }
        Ok(())
    }
}

/// Recipe returned to the client, owner's public fields embedded.
#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<i32>,
    pub user: PublicUser,
}

impl From<RecipeWithOwner> for RecipeResponse {
    fn from(r: RecipeWithOwner) -> Self {
        Self {
            id: r.id,
            title: r.title,
            instructions: r.instructions,
            minutes_to_complete: r.minutes_to_complete,
            user: PublicUser {
                id: r.user_id,
                username: r.username,
                image_url: r.image_url,
                bio: r.bio,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, instructions: &str) -> CreateRecipeRequest {
        CreateRecipeRequest {
            title: title.into(),
            instructions: instructions.into(),
            minutes_to_complete: None,
        }
    }

    #[test]
    fn validate_rejects_instructions_of_49_chars() {
        let err = request("Stew", &"x".repeat(49)).validate().unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn validate_accepts_instructions_of_exactly_50_chars() {
        assert!(request("Stew", &"x".repeat(50)).validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_title() {
        let err = request("", &"x".repeat(80)).validate().unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn response_embeds_owner_public_fields() {
        let row = RecipeWithOwner {
            id: Uuid::new_v4(),
            title: "Stew".into(),
            instructions: "Chop, brown, deglaze, simmer until tender, season and serve.".into(),
            minutes_to_complete: Some(90),
            user_id: Uuid::new_v4(),
            username: "chef".into(),
            image_url: None,
            bio: Some("home cook".into()),
        };
        let owner_id = row.user_id;

        let resp = RecipeResponse::from(row);
        assert_eq!(resp.user.id, owner_id);
        assert_eq!(resp.user.username, "chef");

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["user"]["username"], "chef");
        assert_eq!(json["minutes_to_complete"], 90);
        assert!(json["user"].get("password_hash").is_none());
    }
}
