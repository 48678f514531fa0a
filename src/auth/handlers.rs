use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, PublicUser, SignupRequest},
        password::{hash_password, verify_password},
        repo::User,
        session::{self, AuthUser},
    },
    db::AppState,
    error::ApiError,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", delete(logout))
        .route("/check_session", get(check_session))
}

/// Creates a user. Does not sign the client in; a follow-up login is
/// required to obtain a session cookie.
#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    payload.validate()?;

    let hash = hash_password(&payload.password).map_err(|e| ApiError::Internal(e.to_string()))?;

    let user = User::create(
        &state.db,
        &payload.username,
        &hash,
        payload.image_url.as_deref(),
        payload.bio.as_deref(),
    )
    .await
    .map_err(|e| {
        let err = ApiError::from(e);
        if matches!(err, ApiError::Conflict(_)) {
            warn!(username = %payload.username, "signup username taken");
        }
        err
    })?;

    info!(user_id = %user.id, username = %user.username, "user signed up");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, session, payload))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    // Same response for unknown username and wrong password.
    let user = match User::find_by_username(&state.db, &payload.username).await? {
        Some(u) => u,
        None => {
            warn!(username = %payload.username, "login unknown username");
            return Err(ApiError::Unauthorized(
                "Invalid username or password.".into(),
            ));
        }
    };

    let ok = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if !ok {
        warn!(username = %payload.username, user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized(
            "Invalid username or password.".into(),
        ));
    }

    session::sign_in(&session, user.id).await?;
    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(Json(user.into()))
}

#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode, ApiError> {
    match session::current_user_id(&session).await? {
        Some(user_id) => {
            session::sign_out(&session).await?;
            info!(%user_id, "user logged out");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(ApiError::unauthorized()),
    }
}

#[instrument(skip(state))]
pub async fn check_session(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, user_id).await?.ok_or_else(|| {
        warn!(%user_id, "session bound to missing user");
        ApiError::unauthorized()
    })?;
    Ok(Json(user.into()))
}
