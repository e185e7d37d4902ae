//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST     /signup  -> signup
/// GET|POST /login   -> login (HTTP Basic)
/// POST     /token   -> token (JSON body)
/// GET      /me      -> me (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", get(auth::login).post(auth::login))
        .route("/token", post(auth::token))
        .route("/me", get(auth::me))
}
