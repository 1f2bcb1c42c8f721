//! Student request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{
        MAX_COMMENT_LENGTH, MAX_EMAIL_LENGTH, MAX_PERSON_NAME_LENGTH, MAX_SECTION_NAME_LENGTH,
        MAX_TEAM_NAME_LENGTH,
    },
    models::StudentRecord,
};

/// Enroll student request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(email, length(max = MAX_EMAIL_LENGTH))]
    pub email: String,

    #[validate(length(min = 1, max = MAX_PERSON_NAME_LENGTH))]
    pub name: String,

    #[validate(length(max = MAX_COMMENT_LENGTH))]
    pub comment: Option<String>,

    /// Defaults to the course's default team
    #[validate(length(min = 1, max = MAX_TEAM_NAME_LENGTH))]
    pub team_name: Option<String>,

    #[validate(length(min = 1, max = MAX_SECTION_NAME_LENGTH))]
    pub section_name: Option<String>,

    /// Account the record is registered to, if already known
    pub account_id: Option<String>,
}

impl CreateStudentRequest {
    pub fn into_record(self, course_id: &str) -> StudentRecord {
        let mut record = StudentRecord::new(course_id, self.email, self.name);
        if let Some(comment) = self.comment {
            record = record.with_comment(comment);
        }
        if let Some(team_name) = self.team_name {
            record = record.with_team(team_name);
        }
        if let Some(section_name) = self.section_name {
            record = record.with_section(section_name);
        }
        if let Some(account_id) = self.account_id {
            record = record.with_account(account_id);
        }
        record
    }
}

/// Register student request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterStudentRequest {
    #[validate(length(min = 1))]
    pub account_id: String,
}
