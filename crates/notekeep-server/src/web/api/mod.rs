pub mod auth;
pub mod error;
pub mod middleware;
pub mod notes;

use crate::state::AppState;
use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

pub fn build_api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Public auth routes
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        // Owner-scoped note routes (bearer token required)
        .route(
            "/users/notes",
            post(notes::create_note).get(notes::list_notes),
        )
        .route(
            "/users/notes/{note_id}",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .with_state(state)
}
