use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failure taxonomy shared by every handler. Each variant carries the
/// client-facing message; the status code is derived from the variant.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input, detected before any store mutation.
    #[error("{0}")]
    Validation(String),
    /// Store constraint violation, mutation rolled back.
    #[error("{0}")]
    Conflict(String),
    /// Missing or invalid credentials or session.
    #[error("{0}")]
    Unauthorized(String),
    /// Unexpected failure; the message carries the detail.
    #[error("An error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized("Unauthorized".into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            error!(error = %detail, "request failed");
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db)
                if db.is_unique_violation()
                    || db.is_foreign_key_violation()
                    || db.is_check_violation() =>
            {
                Self::Conflict("Unprocessable Entity".into())
            }
            _ => Self::Internal(e.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Conflict("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::unauthorized().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_message_includes_detail() {
        let err = ApiError::Internal("pool timed out".into());
        assert_eq!(err.to_string(), "An error occurred: pool timed out");
    }

    #[tokio::test]
    async fn response_body_is_error_object() {
        let resp = ApiError::Unauthorized("Invalid username or password.".into()).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["error"], "Invalid username or password.");
    }

    #[test]
    fn sqlx_row_not_found_is_internal() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
