pub mod users;

use axum::response::Redirect;
use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn view_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/users/new") }))
        // Create user
        .route("/users/new", get(users::new_form))
        .route("/users/new/{id}", get(users::show).post(users::submit))
        .route("/users/new/{id}/dialog/dismiss", post(users::dismiss_dialog))
        // HTMX partials
        .route("/htmx/users/new/{id}/fields", post(users::sync_fields))
}
