use axum::routing::get;
use axum::Router;

use crate::handlers::{expense, note};
use crate::state::AppState;

/// Routes mounted at `/expenses`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// PATCH  /{id}          -> patch
/// DELETE /{id}          -> delete
/// GET    /{id}/notes    -> note::list
/// POST   /{id}/notes    -> note::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(expense::list).post(expense::create))
        .route(
            "/{id}",
            get(expense::get_by_id)
                .put(expense::update)
                .patch(expense::patch)
                .delete(expense::delete),
        )
        .route("/{id}/notes", get(note::list).post(note::create))
}
