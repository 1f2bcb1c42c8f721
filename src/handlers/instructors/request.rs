//! Instructor request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{
    constants::{MAX_EMAIL_LENGTH, MAX_PERSON_NAME_LENGTH},
    models::{InstructorPrivileges, InstructorRecord},
};

/// Add instructor request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInstructorRequest {
    #[validate(email, length(max = MAX_EMAIL_LENGTH))]
    pub email: String,

    #[validate(length(min = 1, max = MAX_PERSON_NAME_LENGTH))]
    pub name: String,

    /// Name shown to students
    #[validate(length(min = 1, max = MAX_PERSON_NAME_LENGTH))]
    pub display_name: Option<String>,

    /// Permission role: Co-owner, Manager, Observer, Tutor, Custom.
    /// Defaults to Co-owner.
    pub role: Option<String>,

    pub account_id: Option<String>,
}

impl CreateInstructorRequest {
    pub fn into_record(self, course_id: &str) -> InstructorRecord {
        let mut record = InstructorRecord::new(course_id, self.email, self.name);
        if let Some(role) = self.role {
            record = record.with_role(role);
        }
        if let Some(display_name) = self.display_name {
            record = record.with_display_name(display_name);
        }
        if let Some(account_id) = self.account_id {
            record = record.with_account(account_id);
        }
        record
    }
}

/// Privileges update: either a role whose preset is applied, or an explicit
/// set of privileges
#[derive(Debug, Deserialize)]
pub struct UpdatePrivilegesRequest {
    pub role: Option<String>,
    pub privileges: Option<InstructorPrivileges>,
}
