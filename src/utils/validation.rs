//! Input validation utilities
//!
//! Two tiers: [`require_key`] rejects missing keys as an invariant
//! violation, the `validate_*` functions reject malformed values.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    constants::{self, MAX_COURSE_ID_LENGTH},
    error::{AppError, AppResult},
};

static COURSE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.$_-]+$").expect("course id pattern compiles"));

/// Reject a missing (empty or blank) key argument.
///
/// A missing key means the caller is broken, so this reports an
/// [`AppError::InvariantViolation`] rather than a validation error.
pub fn require_key<'a>(name: &str, value: &'a str) -> AppResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::missing(name));
    }
    Ok(trimmed)
}

/// Validate course id format
pub fn validate_course_id(course_id: &str) -> Result<(), &'static str> {
    if course_id.len() > MAX_COURSE_ID_LENGTH {
        return Err("Course id must be at most 64 characters");
    }
    if !COURSE_ID_PATTERN.is_match(course_id) {
        return Err(
            "Course id can only contain letters, numbers, periods, hyphens, underscores, and dollar signs",
        );
    }
    Ok(())
}

/// Validate a person's name after sanitizing it
pub fn validate_person_name(name: &str) -> Result<String, &'static str> {
    let sanitized = sanitize_string(name);
    if sanitized.is_empty() {
        return Err("Name cannot be empty");
    }
    if sanitized.chars().count() > constants::MAX_PERSON_NAME_LENGTH as usize {
        return Err("Name must be at most 100 characters");
    }
    Ok(sanitized)
}

/// Validate instructor permission role name
pub fn validate_instructor_role(role: &str) -> Result<(), &'static str> {
    if constants::instructor_roles::ALL.contains(&role) {
        Ok(())
    } else {
        Err("Invalid instructor role")
    }
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalize an email for use as a key. Only the domain is case-folded;
/// the local part is kept as given.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}
