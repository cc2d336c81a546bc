pub mod user_forms;

use axum::Router;
use axum::routing::{get, post, put};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // User forms
        .route("/api/v1/user-forms", post(user_forms::create))
        .route(
            "/api/v1/user-forms/{id}",
            get(user_forms::get).delete(user_forms::delete),
        )
        .route("/api/v1/user-forms/{id}/fields", put(user_forms::set_field))
        .route("/api/v1/user-forms/{id}/submit", post(user_forms::submit))
        .route(
            "/api/v1/user-forms/{id}/dialog/dismiss",
            post(user_forms::dismiss_dialog),
        )
}
