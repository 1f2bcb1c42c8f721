//! Utility functions

pub mod validation;

pub use validation::{normalize_email, require_key, sanitize_string, validate_course_id};
