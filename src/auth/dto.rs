use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::repo::User;
use crate::error::ApiError;

/// Request body for signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

impl SignupRequest {
    /// Boundary validation; runs before any store mutation.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ApiError::Validation(
                "Username and password are required".into(),
            ));
        }
        Ok(())
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub image_url: Option<String>,
    pub bio: Option<String>,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            image_url: u.image_url,
            bio: u.bio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, password: &str) -> SignupRequest {
        SignupRequest {
            username: username.into(),
            password: password.into(),
            image_url: None,
            bio: None,
        }
    }

    #[test]
    fn validate_accepts_username_and_password() {
        assert!(request("chef", "hunter2").validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_username() {
        let err = request("", "hunter2").validate().unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn validate_rejects_empty_password() {
        let err = request("chef", "").validate().unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
