//! Course view handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Course routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/courses/{course_id}/teams", get(handler::get_teams))
        .route("/courses/{course_id}/sections", get(handler::get_sections))
}
