//! Instructor membership model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::constants::{instructor_roles, DEFAULT_DISPLAY_NAME_FOR_INSTRUCTOR};

use super::{InstructorPrivileges, StudentRecord};

/// A person's membership of one course as an instructor, keyed by (course, email)
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize, Validate)]
pub struct InstructorRecord {
    pub course_id: String,
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Unset until the person accepts the invitation
    pub account_id: Option<String>,
    /// Name shown to students
    #[validate(length(min = 1, max = 100))]
    pub display_name: String,
    /// Permission role name, e.g. "Co-owner"
    pub role: String,
    #[sqlx(json)]
    pub privileges: InstructorPrivileges,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InstructorRecord {
    /// New co-owner with the default display name
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
            account_id: None,
            display_name: DEFAULT_DISPLAY_NAME_FOR_INSTRUCTOR.to_string(),
            role: instructor_roles::COOWNER.to_string(),
            privileges: InstructorPrivileges::for_role(instructor_roles::COOWNER),
            created_at: now,
            updated_at: now,
        }
    }

    /// Instructor record taking the place of `student` in the same course
    pub fn promoted_from(student: &StudentRecord, role: &str, display_name: &str) -> Self {
        let mut record = Self::new(&student.course_id, &student.email, &student.name)
            .with_role(role)
            .with_display_name(display_name);
        record.account_id = student.account_id.clone();
        record
    }

    /// Sets the role name and replaces the privileges with its preset
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self.privileges = InstructorPrivileges::for_role(&self.role);
        self
    }

    pub fn with_privileges(mut self, privileges: InstructorPrivileges) -> Self {
        self.privileges = privileges;
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn is_coowner(&self) -> bool {
        self.role == instructor_roles::COOWNER
    }

    /// Student record taking the place of this instructor in the same course
    pub fn demoted(&self) -> StudentRecord {
        let mut student = StudentRecord::new(&self.course_id, &self.email, &self.name);
        student.account_id = self.account_id.clone();
        student
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_SECTION_NAME, DEFAULT_TEAM_NAME};
    use crate::models::Privilege;

    #[test]
    fn test_new_instructor_is_coowner() {
        let instr = InstructorRecord::new("testing-course", "test.instr@email.tmt", "My Instructor");
        assert!(instr.is_coowner());
        assert_eq!(instr.display_name, DEFAULT_DISPLAY_NAME_FOR_INSTRUCTOR);
        assert!(instr.privileges.is_allowed_for_course(Privilege::ModifyCourse));
        assert!(instr.validate().is_ok());
    }

    #[test]
    fn test_with_role_resets_privileges() {
        let instr = InstructorRecord::new("c", "i@x.com", "I").with_role(instructor_roles::OBSERVER);
        assert!(!instr.is_coowner());
        assert!(!instr.privileges.is_allowed_for_course(Privilege::ModifyStudent));
    }

    #[test]
    fn test_promotion_and_demotion_keep_identity() {
        let student = StudentRecord::new("course-1", "s@x.com", "Stu")
            .with_team("Team 1.2")
            .with_account("acc-9");
        let instr = InstructorRecord::promoted_from(&student, instructor_roles::TUTOR, "Tutor Stu");
        assert_eq!(instr.course_id, "course-1");
        assert_eq!(instr.email, "s@x.com");
        assert_eq!(instr.account_id.as_deref(), Some("acc-9"));
        assert_eq!(instr.display_name, "Tutor Stu");
        assert_eq!(instr.role, instructor_roles::TUTOR);

        let back = instr.demoted();
        assert_eq!(back.email, "s@x.com");
        assert_eq!(back.account_id.as_deref(), Some("acc-9"));
        assert_eq!(back.team_name, DEFAULT_TEAM_NAME);
        assert_eq!(back.section_name, DEFAULT_SECTION_NAME);
    }
}
