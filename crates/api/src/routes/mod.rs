pub mod accounts;
pub mod auth;
pub mod health;
pub mod movies;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                          sign up (public)
/// /auth/login                           sign in with HTTP Basic (public)
/// /auth/token                           sign in with a JSON body (public)
/// /auth/me                              current account
///
/// /accounts                             list, create (admin only)
/// /accounts/{public_id}                 get, update, delete (self or admin)
///
/// /movies                               list, create
/// /movies/{id}                          get, update, delete
///
/// /tasks                                list, create
/// /tasks/{id}                           get, update, delete
/// /tasks/{id}/complete                  mark completed (POST)
/// ```
///
/// Everything outside `/auth/signup`, `/auth/login` and `/auth/token` goes
/// through the access gate.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/accounts", accounts::router())
        .nest("/movies", movies::router())
        .nest("/tasks", tasks::router())
}
