//! Roster - Course membership and role transitions
//!
//! This library keeps track of who studies and who teaches in each course,
//! and moves accounts between the two roles without leaving a course with a
//! dangling or duplicated membership.
//!
//! # Features
//!
//! - Student and instructor records keyed by (course, email)
//! - An account directory mapping each account to its role per course
//! - Promotion of students to instructors and the reverse downgrade cascade
//! - Compensating rollback when a store write fails part way
//! - In-memory or PostgreSQL stores
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Store traits and their implementations
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
