//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`CurrentAccount`] and rejects requests whose account
//! does not meet the requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use cinelog_core::error::CoreError;
use cinelog_core::types::PublicId;
use cinelog_db::models::account::Account;

use super::auth::CurrentAccount;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Requires an admin account. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     // admin.is_admin is guaranteed here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub Account);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentAccount(account) = CurrentAccount::from_request_parts(parts, state).await?;
        if !account.is_admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(account))
    }
}

/// Allow `actor` to act on the account identified by `target` only if it is
/// their own account or they are an admin.
pub fn ensure_self_or_admin(actor: &Account, target: PublicId) -> AppResult<()> {
    if actor.public_id == target || actor.is_admin {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Cannot act on another account".into(),
        )))
    }
}
