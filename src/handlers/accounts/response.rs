//! Account response DTOs

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Role;

/// Whether an account instructs any course
#[derive(Debug, Serialize)]
pub struct InstructorStatusResponse {
    pub account_id: String,
    pub is_instructor: bool,
}

/// Role held by an account in each of its courses
#[derive(Debug, Serialize)]
pub struct AccountCoursesResponse {
    pub account_id: String,
    pub courses: BTreeMap<String, Role>,
}
