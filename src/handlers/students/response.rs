//! Student response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::StudentRecord;

/// Student response
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub course_id: String,
    pub email: String,
    pub name: String,
    pub comment: String,
    pub team_name: String,
    pub section_name: String,
    pub account_id: Option<String>,
    pub is_registered: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<StudentRecord> for StudentResponse {
    fn from(record: StudentRecord) -> Self {
        Self {
            is_registered: record.is_registered(),
            course_id: record.course_id,
            email: record.email,
            name: record.name,
            comment: record.comment,
            team_name: record.team_name,
            section_name: record.section_name,
            account_id: record.account_id,
            updated_at: record.updated_at,
        }
    }
}

/// Students of one course
#[derive(Debug, Serialize)]
pub struct StudentsListResponse {
    pub course_id: String,
    pub students: Vec<StudentResponse>,
    pub total: usize,
}
