//! Role transition results

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Direction of a role transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Promotion,
    Demotion,
}

/// Non-fatal condition left behind by a successful transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// The demoted account was the course's only instructor
    CourseWithoutInstructor { course_id: String },
    /// Instructors remain, but the last co-owner was demoted
    CourseWithoutCoOwner { course_id: String },
    /// The directory listed a role with no backing record; only the
    /// directory entry was changed
    MissingMembershipRecord { course_id: String },
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CourseWithoutInstructor { course_id } => {
                write!(f, "course {} has no instructor left", course_id)
            }
            Self::CourseWithoutCoOwner { course_id } => {
                write!(f, "course {} has no co-owner left", course_id)
            }
            Self::MissingMembershipRecord { course_id } => {
                write!(f, "course {} had no membership record for the account", course_id)
            }
        }
    }
}

/// Outcome of a promotion or demotion
#[derive(Debug, Clone, Serialize)]
pub struct TransitionReport {
    pub id: Uuid,
    pub account_id: String,
    pub kind: TransitionKind,
    /// Courses whose records were changed, in course id order
    pub courses: Vec<String>,
    pub advisories: Vec<Advisory>,
    pub completed_at: DateTime<Utc>,
}

impl TransitionReport {
    pub fn new(account_id: impl Into<String>, kind: TransitionKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id: account_id.into(),
            kind,
            courses: Vec::new(),
            advisories: Vec::new(),
            completed_at: Utc::now(),
        }
    }

    /// True when nothing needed changing
    pub fn is_noop(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn has_advisories(&self) -> bool {
        !self.advisories.is_empty()
    }
}
