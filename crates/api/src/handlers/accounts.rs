//! Handlers for the `/accounts` resource.
//!
//! Listing and creating accounts is admin-only. Reading, updating, and
//! deleting an account is allowed for the account itself or an admin.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cinelog_core::error::CoreError;
use cinelog_core::types::PublicId;
use cinelog_core::validation::{validate_password_strength, MIN_PASSWORD_LENGTH};
use cinelog_db::models::account::{Account, AccountResponse, CreateAccount, UpdateAccount};
use cinelog_db::repositories::AccountRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentAccount;
use crate::middleware::rbac::{ensure_self_or_admin, RequireAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /accounts`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, max = 128))]
    pub username: String,
    pub password: String,
    #[validate(length(min = 1, max = 128))]
    pub fullname: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Request body for `PUT /accounts/{public_id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1, max = 128))]
    pub fullname: Option<String>,
    pub password: Option<String>,
    /// Only honoured when the caller is an admin.
    pub is_admin: Option<bool>,
}

/// Plaintext account details shared by sign-up, admin creation, and the
/// startup bootstrap.
#[derive(Debug)]
pub(crate) struct NewAccount {
    pub username: String,
    pub password: String,
    pub fullname: String,
    pub is_admin: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/accounts
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<AccountResponse>>>> {
    let accounts = AccountRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: accounts.iter().map(AccountResponse::from).collect(),
    }))
}

/// POST /api/v1/accounts
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AccountResponse>>)> {
    input.validate()?;

    let account = create_account(
        &state,
        NewAccount {
            username: input.username,
            password: input.password,
            fullname: input.fullname,
            is_admin: input.is_admin,
        },
    )
    .await?;
    tracing::info!(by = %admin.public_id, public_id = %account.public_id, "Admin created account");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AccountResponse::from(&account),
        }),
    ))
}

/// GET /api/v1/accounts/{public_id}
pub async fn get_by_public_id(
    State(state): State<AppState>,
    CurrentAccount(actor): CurrentAccount,
    Path(public_id): Path<PublicId>,
) -> AppResult<Json<DataResponse<AccountResponse>>> {
    let account = load_target(&state, &actor, public_id).await?;
    Ok(Json(DataResponse {
        data: AccountResponse::from(&account),
    }))
}

/// PUT /api/v1/accounts/{public_id}
///
/// Change the display name and/or password. Outstanding tokens stay valid
/// until they expire.
pub async fn update(
    State(state): State<AppState>,
    CurrentAccount(actor): CurrentAccount,
    Path(public_id): Path<PublicId>,
    Json(input): Json<UpdateAccountRequest>,
) -> AppResult<Json<DataResponse<AccountResponse>>> {
    input.validate()?;
    if input.is_admin.is_some() && !actor.is_admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only admins can change admin status".into(),
        )));
    }

    let target = load_target(&state, &actor, public_id).await?;

    let password_hash = match input.password.as_deref() {
        Some(password) => {
            validate_password_strength(password, MIN_PASSWORD_LENGTH)?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
        None => None,
    };

    let changes = UpdateAccount {
        password_hash,
        fullname: input.fullname,
        is_admin: input.is_admin,
    };
    let account = AccountRepo::update(&state.pool, target.id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundByPublicId {
            entity: "Account",
            public_id,
        }))?;

    tracing::info!(by = %actor.public_id, %public_id, "Account updated");
    Ok(Json(DataResponse {
        data: AccountResponse::from(&account),
    }))
}

/// DELETE /api/v1/accounts/{public_id}
///
/// Deletes the account together with its movies and tasks. Tokens already
/// issued for it are rejected from then on as an unknown subject.
pub async fn delete(
    State(state): State<AppState>,
    CurrentAccount(actor): CurrentAccount,
    Path(public_id): Path<PublicId>,
) -> AppResult<StatusCode> {
    let target = load_target(&state, &actor, public_id).await?;

    if AccountRepo::delete(&state.pool, target.id).await? {
        tracing::info!(by = %actor.public_id, %public_id, "Account deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFoundByPublicId {
            entity: "Account",
            public_id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate the password, hash it, and insert the account.
///
/// A taken username is reported as 409 Conflict.
pub(crate) async fn create_account(state: &AppState, input: NewAccount) -> AppResult<Account> {
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)?;

    if AccountRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Username '{}' is already taken",
            input.username
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let account = AccountRepo::create(
        &state.pool,
        &CreateAccount {
            username: input.username,
            password_hash,
            fullname: input.fullname,
            is_admin: input.is_admin,
        },
    )
    .await?;

    tracing::info!(public_id = %account.public_id, username = %account.username, "Account registered");
    Ok(account)
}

async fn load_target(state: &AppState, actor: &Account, public_id: PublicId) -> AppResult<Account> {
    ensure_self_or_admin(actor, public_id)?;
    AccountRepo::find_by_public_id(&state.pool, public_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundByPublicId {
            entity: "Account",
            public_id,
        }))
}
