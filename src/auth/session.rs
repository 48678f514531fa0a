use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;

/// Session key under which the authenticated user's id is stored.
pub const USER_ID_KEY: &str = "user_id";

/// Binds the session to the given user id, overwriting prior state.
pub async fn sign_in(session: &Session, user_id: Uuid) -> Result<(), ApiError> {
    session
        .insert(USER_ID_KEY, user_id)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Removes all session state, including the store record.
pub async fn sign_out(session: &Session) -> Result<(), ApiError> {
    session
        .flush()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Reads the bound user id, if any.
pub async fn current_user_id(session: &Session) -> Result<Option<Uuid>, ApiError> {
    session
        .get::<Uuid>(USER_ID_KEY)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Extracts the authenticated user's id from the request session.
/// Handlers that take this argument are only reachable with a signed-in
/// session; contents are trusted because the session layer already
/// rejected cookies that fail its integrity check.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| ApiError::Internal(msg.to_string()))?;

        match current_user_id(&session).await? {
            Some(user_id) => Ok(AuthUser(user_id)),
            None => {
                warn!("request without a signed-in session");
                Err(ApiError::unauthorized())
            }
        }
    }
}
