//! Movie entity model and DTOs.

use cinelog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A movie row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    /// Owning account's internal row id; not part of the public payload.
    #[serde(skip_serializing)]
    pub account_id: DbId,
    pub genre: String,
    pub title: String,
    pub directors: String,
    pub actors: String,
    pub year: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new movie.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMovie {
    #[validate(length(min = 1, max = 64))]
    pub genre: String,
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(length(max = 256))]
    pub directors: String,
    #[validate(length(max = 256))]
    pub actors: String,
    pub year: String,
}

/// DTO for updating an existing movie. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMovie {
    #[validate(length(min = 1, max = 64))]
    pub genre: Option<String>,
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,
    #[validate(length(max = 256))]
    pub directors: Option<String>,
    #[validate(length(max = 256))]
    pub actors: Option<String>,
    pub year: Option<String>,
}
