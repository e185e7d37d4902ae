//! Repository for the `movies` table.
//!
//! Every query is scoped to the owning account; a movie belonging to another
//! account behaves exactly like a missing one.

use chrono::Utc;
use cinelog_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::movie::{CreateMovie, Movie, UpdateMovie};

const COLUMNS: &str =
    "id, account_id, genre, title, directors, actors, year, created_at, updated_at";

pub struct MovieRepo;

impl MovieRepo {
    /// Insert a movie owned by `account_id`, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        account_id: DbId,
        input: &CreateMovie,
    ) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (account_id, genre, title, directors, actors, year, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(account_id)
            .bind(&input.genre)
            .bind(&input.title)
            .bind(&input.directors)
            .bind(&input.actors)
            .bind(&input.year)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// List an account's movies in insertion order.
    pub async fn list_for_account(
        pool: &SqlitePool,
        account_id: DbId,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE account_id = ?1 ORDER BY id");
        sqlx::query_as::<_, Movie>(&query)
            .bind(account_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_for_account(
        pool: &SqlitePool,
        account_id: DbId,
        id: DbId,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = ?1 AND account_id = ?2");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a movie. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &SqlitePool,
        account_id: DbId,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET
                genre = COALESCE(?3, genre),
                title = COALESCE(?4, title),
                directors = COALESCE(?5, directors),
                actors = COALESCE(?6, actors),
                year = COALESCE(?7, year),
                updated_at = ?8
             WHERE id = ?1 AND account_id = ?2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(account_id)
            .bind(&input.genre)
            .bind(&input.title)
            .bind(&input.directors)
            .bind(&input.actors)
            .bind(&input.year)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &SqlitePool, account_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?1 AND account_id = ?2")
            .bind(id)
            .bind(account_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
