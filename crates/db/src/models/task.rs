//! To-do task entity model and DTOs.

use cinelog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub account_id: DbId,
    pub title: String,
    pub completed: bool,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 140))]
    pub title: String,
}

/// DTO for updating an existing task. All fields are optional.
///
/// Setting `completed` to `true` stamps `completed_at`; setting it back to
/// `false` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 140))]
    pub title: Option<String>,
    pub completed: Option<bool>,
}
