//! Student membership handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Student routes, scoped to a course
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/courses/{course_id}/students",
            get(handler::list_students).post(handler::create_student),
        )
        .route(
            "/courses/{course_id}/students/{email}",
            get(handler::get_student)
                .put(handler::update_student)
                .delete(handler::delete_student),
        )
        .route(
            "/courses/{course_id}/students/{email}/register",
            post(handler::register_student),
        )
}
