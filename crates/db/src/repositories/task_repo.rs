//! Repository for the `tasks` table (the to-do list).

use chrono::Utc;
use cinelog_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::task::{CreateTask, Task, UpdateTask};

const COLUMNS: &str = "id, account_id, title, completed, created_at, completed_at";

pub struct TaskRepo;

impl TaskRepo {
    pub async fn create(
        pool: &SqlitePool,
        account_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (account_id, title, created_at)
             VALUES (?1, ?2, ?3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(account_id)
            .bind(&input.title)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// List an account's tasks, open ones first, then by creation order.
    pub async fn list_for_account(
        pool: &SqlitePool,
        account_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE account_id = ?1 ORDER BY completed, id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(account_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_for_account(
        pool: &SqlitePool,
        account_id: DbId,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = ?1 AND account_id = ?2");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    ///
    /// `completed_at` keeps its first completion time while the task stays
    /// completed and is cleared when the task is reopened.
    pub async fn update(
        pool: &SqlitePool,
        account_id: DbId,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE(?3, title),
                completed = COALESCE(?4, completed),
                completed_at = CASE
                    WHEN ?4 IS NULL THEN completed_at
                    WHEN ?4 THEN COALESCE(completed_at, ?5)
                    ELSE NULL
                END
             WHERE id = ?1 AND account_id = ?2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(account_id)
            .bind(&input.title)
            .bind(input.completed)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Mark a task completed. Returns `None` if the task does not exist for
    /// this account.
    pub async fn mark_completed(
        pool: &SqlitePool,
        account_id: DbId,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let input = UpdateTask {
            title: None,
            completed: Some(true),
        };
        Self::update(pool, account_id, id, &input).await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &SqlitePool, account_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1 AND account_id = ?2")
            .bind(id)
            .bind(account_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
