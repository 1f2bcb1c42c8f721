//! Instructor response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{InstructorPrivileges, InstructorRecord};

/// Instructor response
#[derive(Debug, Serialize)]
pub struct InstructorResponse {
    pub course_id: String,
    pub email: String,
    pub name: String,
    pub display_name: String,
    pub role: String,
    pub privileges: InstructorPrivileges,
    pub account_id: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<InstructorRecord> for InstructorResponse {
    fn from(record: InstructorRecord) -> Self {
        Self {
            course_id: record.course_id,
            email: record.email,
            name: record.name,
            display_name: record.display_name,
            role: record.role,
            privileges: record.privileges,
            account_id: record.account_id,
            updated_at: record.updated_at,
        }
    }
}

/// Instructors of one course
#[derive(Debug, Serialize)]
pub struct InstructorsListResponse {
    pub course_id: String,
    pub instructors: Vec<InstructorResponse>,
    pub total: usize,
}
