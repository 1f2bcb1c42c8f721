//! Account role handlers

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

/// Account routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts/{id}/courses", get(handler::get_account_courses))
        .route("/accounts/{id}/instructor", get(handler::get_instructor_status))
        // Role transitions
        .route("/accounts/{id}/promote", post(handler::promote_account))
        .route("/accounts/{id}/downgrade", post(handler::downgrade_account))
}
