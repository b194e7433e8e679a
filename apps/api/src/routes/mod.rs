pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::library::handlers as library;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session state machine
        .route("/api/v1/session", get(session::handle_get_session))
        .route(
            "/api/v1/session/landing",
            post(session::handle_dismiss_landing),
        )
        .route(
            "/api/v1/session/language",
            put(session::handle_set_language),
        )
        .route(
            "/api/v1/session/onboarding",
            put(session::handle_set_onboarding),
        )
        .route("/api/v1/session/active", put(session::handle_set_active))
        .route(
            "/api/v1/onboarding/start-fresh",
            post(session::handle_start_fresh),
        )
        .route(
            "/api/v1/onboarding/sample",
            post(session::handle_load_sample),
        )
        // Working document
        .route("/api/v1/document", get(session::handle_get_document))
        .route(
            "/api/v1/document/save",
            post(session::handle_save_document),
        )
        .route("/api/v1/document/title", patch(session::handle_set_title))
        .route(
            "/api/v1/document/basic-info",
            patch(session::handle_update_basic_info),
        )
        .route(
            "/api/v1/document/metadata",
            patch(session::handle_update_metadata),
        )
        .route(
            "/api/v1/document/sections",
            post(session::handle_add_section),
        )
        .route(
            "/api/v1/document/sections/:id",
            patch(session::handle_update_section).delete(session::handle_remove_section),
        )
        .route(
            "/api/v1/document/sections/:id/position",
            put(session::handle_move_section),
        )
        .route(
            "/api/v1/document/sections/:id/entries",
            post(session::handle_add_entry),
        )
        .route(
            "/api/v1/document/sections/:id/entries/:entry_id",
            patch(session::handle_update_entry).delete(session::handle_remove_entry),
        )
        .route(
            "/api/v1/document/sections/:id/entries/:entry_id/position",
            put(session::handle_move_entry),
        )
        // Library
        .route("/api/v1/library", get(library::handle_list_resumes))
        .route(
            "/api/v1/library/:id",
            get(library::handle_get_resume).delete(library::handle_remove_resume),
        )
        .route("/api/v1/library/:id/open", post(library::handle_open_resume))
        .with_state(state)
}
