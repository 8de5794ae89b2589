pub mod category;
pub mod expense;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                      list, create
/// /categories/{id}                 get, full update, partial update, delete
///
/// /expenses                        list, create
/// /expenses/{id}                   get, full update, partial update, delete
/// /expenses/{id}/notes             list, create
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", category::router())
        .nest("/expenses", expense::router())
}
