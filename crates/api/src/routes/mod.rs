//! Route table for the catalog API.

pub mod health;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{character, location};
use crate::state::AppState;

/// Build the contract route tree (mounted at the root).
///
/// ```text
/// POST   /create_char             create character
/// GET    /read_char_all?page=N    paged character listing
/// GET    /read_char/{id}          single character
/// PUT    /update_char/{id}        partial update
/// DELETE /delete_char/{id}        delete + residents cleanup
///
/// POST   /create_location         create location
/// GET    /read_location_all?page=N
/// GET    /read_location/{id}
/// PUT    /update_location/{id}
/// DELETE /delete_location/{id}    delete + reference cleanup
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/create_char", post(character::create))
        .route("/read_char_all", get(character::read_all))
        .route("/read_char/{id}", get(character::read))
        .route("/update_char/{id}", put(character::update))
        .route("/delete_char/{id}", delete(character::delete))
        .route("/create_location", post(location::create))
        .route("/read_location_all", get(location::read_all))
        .route("/read_location/{id}", get(location::read))
        .route("/update_location/{id}", put(location::update))
        .route("/delete_location/{id}", delete(location::delete))
}
