//! Startup provisioning of the first admin account.

use cinelog_db::repositories::AccountRepo;

use crate::config::BootstrapAdmin;
use crate::error::AppResult;
use crate::handlers::accounts::{create_account, NewAccount};
use crate::state::AppState;

/// Create the configured admin account unless that username already exists.
///
/// Returns `true` if an account was created. An existing account is left
/// untouched, even if it is not an admin.
pub async fn ensure_admin(state: &AppState, admin: &BootstrapAdmin) -> AppResult<bool> {
    if AccountRepo::find_by_username(&state.pool, &admin.username)
        .await?
        .is_some()
    {
        tracing::debug!(username = %admin.username, "Bootstrap admin already present");
        return Ok(false);
    }

    let account = create_account(
        state,
        NewAccount {
            username: admin.username.clone(),
            password: admin.password.clone(),
            fullname: admin.username.clone(),
            is_admin: true,
        },
    )
    .await?;
    tracing::info!(public_id = %account.public_id, "Bootstrap admin created");
    Ok(true)
}
