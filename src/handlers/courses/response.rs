//! Course response DTOs

use std::collections::BTreeSet;

use serde::Serialize;

/// Distinct team names of a course
#[derive(Debug, Serialize)]
pub struct TeamsResponse {
    pub course_id: String,
    pub teams: BTreeSet<String>,
}

/// Distinct section names of a course
#[derive(Debug, Serialize)]
pub struct SectionsResponse {
    pub course_id: String,
    pub sections: BTreeSet<String>,
}
