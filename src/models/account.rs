//! Account and role model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Role an account holds within one course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Instructor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Instructor => "instructor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Self::Student),
            "instructor" => Some(Self::Instructor),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A person's identity across courses, as seen by the account directory.
///
/// Keyed by course id, so an account can never hold two roles in one course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub roles: BTreeMap<String, Role>,
}

impl Account {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roles: BTreeMap::new(),
        }
    }

    /// Role held in the given course, if any
    pub fn role_in(&self, course_id: &str) -> Option<Role> {
        self.roles.get(course_id).copied()
    }

    /// Course ids where the account holds `role`, in course id order
    pub fn courses_with(&self, role: Role) -> Vec<String> {
        self.roles
            .iter()
            .filter(|(_, r)| **r == role)
            .map(|(course_id, _)| course_id.clone())
            .collect()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.values().any(|r| *r == role)
    }
}
