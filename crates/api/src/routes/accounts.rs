//! Route definitions for the `/accounts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::accounts;
use crate::state::AppState;

/// Routes mounted at `/accounts`.
///
/// ```text
/// GET    /              -> list (admin)
/// POST   /              -> create (admin)
/// GET    /{public_id}   -> get_by_public_id
/// PUT    /{public_id}   -> update
/// DELETE /{public_id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(accounts::list).post(accounts::create))
        .route(
            "/{public_id}",
            get(accounts::get_by_public_id)
                .put(accounts::update)
                .delete(accounts::delete),
        )
}
