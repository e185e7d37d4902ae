//! Repository for the `accounts` table.

use chrono::Utc;
use cinelog_core::types::{DbId, PublicId};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::account::{Account, CreateAccount, UpdateAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, public_id, username, password_hash, fullname, is_admin, created_at, updated_at";

/// Provides CRUD operations for accounts.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account with a freshly generated public id, returning the
    /// created row.
    pub async fn create(pool: &SqlitePool, input: &CreateAccount) -> Result<Account, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO accounts (public_id, username, password_hash, fullname, is_admin, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             RETURNING {COLUMNS}"
        );
        let account = sqlx::query_as::<_, Account>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.fullname)
            .bind(input.is_admin)
            .bind(now)
            .fetch_one(pool)
            .await?;
        tracing::debug!(public_id = %account.public_id, username = %account.username, "Account created");
        Ok(account)
    }

    /// Find an account by internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = ?1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by its public identifier.
    pub async fn find_by_public_id(
        pool: &SqlitePool,
        public_id: PublicId,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE public_id = ?1");
        sqlx::query_as::<_, Account>(&query)
            .bind(public_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by login name (case-sensitive).
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE username = ?1");
        sqlx::query_as::<_, Account>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List all accounts, oldest first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts ORDER BY id");
        sqlx::query_as::<_, Account>(&query).fetch_all(pool).await
    }

    /// Update an account. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateAccount,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!(
            "UPDATE accounts SET
                password_hash = COALESCE(?2, password_hash),
                fullname = COALESCE(?3, fullname),
                is_admin = COALESCE(?4, is_admin),
                updated_at = ?5
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .bind(&input.password_hash)
            .bind(&input.fullname)
            .bind(input.is_admin)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Delete an account. Owned movies and tasks are removed by the
    /// `ON DELETE CASCADE` foreign keys.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
