//! HTTP REST API routes

mod assistant_routes;
mod email_routes;
pub mod error;
mod generation_routes;
mod lesson_routes;
mod waitlist_routes;

use axum::{routing::post, Router};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Generation pipelines
        .route("/api/generate", post(generation_routes::generate_character))
        .route("/api/teacher", post(lesson_routes::generate_lesson))
        // Email
        .route("/api/send-email", post(email_routes::send_mentor_email))
        .route(
            "/api/send-welcome-email",
            post(email_routes::send_welcome_email),
        )
        // Signups and voice assistants
        .route("/api/waitlist", post(waitlist_routes::join_waitlist))
        .route("/api/vapi/token", post(assistant_routes::issue_token))
}
