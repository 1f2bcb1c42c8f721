//! Instructor membership handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, put},
    Router,
};

use crate::state::AppState;

/// Instructor routes, scoped to a course
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/courses/{course_id}/instructors",
            get(handler::list_instructors).post(handler::create_instructor),
        )
        .route(
            "/courses/{course_id}/instructors/{email}",
            get(handler::get_instructor).delete(handler::delete_instructor),
        )
        .route(
            "/courses/{course_id}/instructors/{email}/privileges",
            put(handler::update_privileges),
        )
}
