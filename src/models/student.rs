//! Student membership model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::constants::{DEFAULT_SECTION_NAME, DEFAULT_TEAM_NAME};

/// A person's membership of one course as a student, keyed by (course, email)
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize, Validate)]
pub struct StudentRecord {
    pub course_id: String,
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 500))]
    pub comment: String,
    #[validate(length(min = 1, max = 60))]
    pub team_name: String,
    #[validate(length(min = 1, max = 60))]
    pub section_name: String,
    /// Unset until the person registers
    pub account_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudentRecord {
    pub fn new(
        course_id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            course_id: course_id.into(),
            email: email.into(),
            name: name.into(),
            comment: String::new(),
            team_name: DEFAULT_TEAM_NAME.to_string(),
            section_name: DEFAULT_SECTION_NAME.to_string(),
            account_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_team(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = team_name.into();
        self
    }

    pub fn with_section(mut self, section_name: impl Into<String>) -> Self {
        self.section_name = section_name.into();
        self
    }

    pub fn with_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn is_registered(&self) -> bool {
        self.account_id.is_some()
    }
}

/// Partial update of a student record; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StudentUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub comment: Option<String>,
    #[validate(length(min = 1, max = 60))]
    pub team_name: Option<String>,
    #[validate(length(min = 1, max = 60))]
    pub section_name: Option<String>,
}

impl StudentUpdate {
    pub fn team(team_name: impl Into<String>) -> Self {
        Self {
            team_name: Some(team_name.into()),
            ..Self::default()
        }
    }

    /// Apply the update, returning the changed record
    pub fn apply(self, mut record: StudentRecord) -> StudentRecord {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(comment) = self.comment {
            record.comment = comment;
        }
        if let Some(team_name) = self.team_name {
            record.team_name = team_name;
        }
        if let Some(section_name) = self.section_name {
            record.section_name = section_name;
        }
        record.updated_at = Utc::now();
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_student_defaults() {
        let s = StudentRecord::new("valid-course", "valid@email.com", "valid student");
        assert_eq!(s.team_name, DEFAULT_TEAM_NAME);
        assert_eq!(s.section_name, DEFAULT_SECTION_NAME);
        assert!(!s.is_registered());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_fields() {
        let bad_email = StudentRecord::new("valid-course", "not-an-email", "valid student");
        assert!(bad_email.validate().is_err());

        let empty_name = StudentRecord::new("valid-course", "valid@email.com", "");
        assert!(empty_name.validate().is_err());

        let empty_team = StudentRecord::new("valid-course", "valid@email.com", "name").with_team("");
        assert!(empty_team.validate().is_err());
    }

    #[test]
    fn test_update_applies_only_given_fields() {
        let s = StudentRecord::new("c", "a@b.com", "Alice").with_team("Team 1");
        let updated = StudentUpdate::team("Team 2").apply(s.clone());
        assert_eq!(updated.team_name, "Team 2");
        assert_eq!(updated.name, "Alice");
        assert_eq!(updated.section_name, s.section_name);
    }
}
