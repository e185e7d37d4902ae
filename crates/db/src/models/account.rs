//! Account entity model and DTOs.

use cinelog_core::types::{DbId, PublicId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full account row from the `accounts` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`AccountResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: DbId,
    pub public_id: PublicId,
    pub username: String,
    pub password_hash: String,
    pub fullname: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe account representation for API responses (no hash, no row id).
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub public_id: PublicId,
    pub username: String,
    pub fullname: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            public_id: account.public_id,
            username: account.username.clone(),
            fullname: account.fullname.clone(),
            is_admin: account.is_admin,
            created_at: account.created_at,
        }
    }
}

/// DTO for creating a new account. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub username: String,
    pub password_hash: String,
    pub fullname: String,
    pub is_admin: bool,
}

/// DTO for updating an existing account. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccount {
    pub password_hash: Option<String>,
    pub fullname: Option<String>,
    pub is_admin: Option<bool>,
}
