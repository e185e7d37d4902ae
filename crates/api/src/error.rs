use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use cinelog_core::error::CoreError;
use serde_json::json;

use crate::auth::{AuthError, Unauthorized, LOGIN_CHALLENGE};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`AuthError`] for sign-in and
/// access-gate rejections, plus database and internal failures. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cinelog_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Credential or token rejection.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<Unauthorized> for AppError {
    fn from(reason: Unauthorized) -> Self {
        AppError::Auth(AuthError::Unauthorized(reason))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::from(errors))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::NotFoundByPublicId { entity, public_id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} {public_id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            },

            // --- Authentication ---
            AppError::Auth(AuthError::AuthenticationFailed) => {
                let body = json!({
                    "error": AuthError::AuthenticationFailed.to_string(),
                    "code": "AUTHENTICATION_FAILED",
                });
                return (
                    StatusCode::UNAUTHORIZED,
                    [(WWW_AUTHENTICATE, HeaderValue::from_static(LOGIN_CHALLENGE))],
                    axum::Json(body),
                )
                    .into_response();
            }
            AppError::Auth(AuthError::Unauthorized(reason)) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", reason.to_string())
            }

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Internal ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => (
            StatusCode::CONFLICT,
            "CONFLICT",
            "Duplicate value violates a unique constraint".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, Option<String>, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let challenge = response
            .headers()
            .get(WWW_AUTHENTICATE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, challenge, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_authentication_failure_carries_challenge() {
        let (status, challenge, body) = render(AuthError::AuthenticationFailed.into()).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(challenge.as_deref(), Some(LOGIN_CHALLENGE));
        assert_eq!(body["code"], "AUTHENTICATION_FAILED");
        assert_eq!(body["error"], "could not verify");
    }

    #[tokio::test]
    async fn test_gate_rejections_use_generic_messages() {
        let cases = [
            (Unauthorized::MissingCredential, "missing credential"),
            (Unauthorized::InvalidCredential, "invalid credential"),
            (Unauthorized::UnknownSubject, "unknown subject"),
        ];
        for (reason, message) in cases {
            let (status, challenge, body) = render(reason.into()).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(challenge.is_none());
            assert_eq!(body["code"], "UNAUTHORIZED");
            assert_eq!(body["error"], message);
        }
    }

    #[tokio::test]
    async fn test_internal_errors_are_sanitized() {
        let (status, _, body) =
            render(AppError::InternalError("secret detail".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "An internal error occurred");
    }

    #[tokio::test]
    async fn test_row_not_found_maps_to_404() {
        let (status, _, body) = render(AppError::Database(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_only_auth_errors_map_to_401() {
        let domain_errors = [
            CoreError::NotFound { entity: "Movie", id: 1 },
            CoreError::Validation("bad year".into()),
            CoreError::Conflict("taken".into()),
            CoreError::Forbidden("nope".into()),
        ];
        for err in domain_errors {
            let (status, _, _) = render(err.into()).await;
            assert_ne!(status, StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_forbidden_maps_to_403() {
        let (status, _, body) =
            render(CoreError::Forbidden("Admin role required".into()).into()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Admin role required");
    }
}
