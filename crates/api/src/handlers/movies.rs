//! Handlers for the `/movies` resource.
//!
//! Every movie belongs to the calling account; another account's movie is
//! reported as not found.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cinelog_core::error::CoreError;
use cinelog_core::types::DbId;
use cinelog_core::validation::validate_release_year;
use cinelog_db::models::movie::{CreateMovie, Movie, UpdateMovie};
use cinelog_db::repositories::MovieRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentAccount;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/movies
pub async fn create(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Json(input): Json<CreateMovie>,
) -> AppResult<(StatusCode, Json<DataResponse<Movie>>)> {
    input.validate()?;
    validate_release_year(&input.year)?;

    let movie = MovieRepo::create(&state.pool, account.id, &input).await?;
    tracing::debug!(movie_id = movie.id, public_id = %account.public_id, "Movie created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: movie })))
}

/// GET /api/v1/movies
pub async fn list(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
) -> AppResult<Json<DataResponse<Vec<Movie>>>> {
    let movies = MovieRepo::list_for_account(&state.pool, account.id).await?;
    Ok(Json(DataResponse { data: movies }))
}

/// GET /api/v1/movies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Movie>>> {
    let movie = MovieRepo::find_for_account(&state.pool, account.id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Movie", id }))?;
    Ok(Json(DataResponse { data: movie }))
}

/// PUT /api/v1/movies/{id}
pub async fn update(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMovie>,
) -> AppResult<Json<DataResponse<Movie>>> {
    input.validate()?;
    if let Some(year) = input.year.as_deref() {
        validate_release_year(year)?;
    }

    let movie = MovieRepo::update(&state.pool, account.id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Movie", id }))?;
    Ok(Json(DataResponse { data: movie }))
}

/// DELETE /api/v1/movies/{id}
pub async fn delete(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MovieRepo::delete(&state.pool, account.id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Movie", id }))
    }
}
