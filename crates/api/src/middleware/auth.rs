//! The access gate: token-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use chrono::Utc;
use cinelog_core::types::Timestamp;
use cinelog_db::models::account::Account;
use cinelog_db::repositories::AccountRepo;

use crate::auth::jwt::validate_token;
use crate::auth::{Unauthorized, ACCESS_TOKEN_HEADER};
use crate::error::AppResult;
use crate::state::AppState;

/// Account resolved from the `x-access-token` header.
///
/// Protected handlers take this as an extractor parameter; a handler that
/// needs the caller's identity cannot be written without it:
///
/// ```ignore
/// async fn my_handler(CurrentAccount(account): CurrentAccount) -> AppResult<Json<()>> {
///     tracing::info!(public_id = %account.public_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

/// Run the gate against a request's headers as of `now`.
///
/// 1. No header, or a blank one: [`Unauthorized::MissingCredential`].
/// 2. Non-ASCII header, bad signature, malformed token, or expired:
///    [`Unauthorized::InvalidCredential`].
/// 3. Subject no longer exists: [`Unauthorized::UnknownSubject`].
pub async fn authenticate(headers: &HeaderMap, state: &AppState, now: Timestamp) -> AppResult<Account> {
    let raw = headers
        .get(ACCESS_TOKEN_HEADER)
        .ok_or(Unauthorized::MissingCredential)?;

    let token = raw
        .to_str()
        .map_err(|_| Unauthorized::InvalidCredential)?
        .trim();
    if token.is_empty() {
        return Err(Unauthorized::MissingCredential.into());
    }

    let claims = validate_token(token, &state.config.jwt, now).map_err(|e| {
        tracing::debug!(error = %e, "Rejected access token");
        Unauthorized::InvalidCredential
    })?;

    let account = AccountRepo::find_by_public_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::debug!(subject = %claims.sub, "Token subject no longer exists");
            Unauthorized::UnknownSubject
        })?;

    Ok(account)
}

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = crate::error::AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let account = authenticate(&parts.headers, state, Utc::now()).await?;
        Ok(CurrentAccount(account))
    }
}
