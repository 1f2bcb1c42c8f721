//! Instructor privilege model
//!
//! A privilege set is an immutable value: edits build a new set and the
//! owning instructor record replaces its set wholesale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::instructor_roles;

/// A single capability an instructor may be granted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    ModifyCourse,
    ModifyInstructor,
    ModifySession,
    ModifyStudent,
    ViewStudentInSections,
    SubmitSessionInSections,
    ViewSessionInSections,
    ModifySessionCommentInSections,
}

impl Privilege {
    /// Whether a section override can change this capability
    pub fn is_section_scoped(&self) -> bool {
        matches!(
            self,
            Self::ViewStudentInSections
                | Self::SubmitSessionInSections
                | Self::ViewSessionInSections
                | Self::ModifySessionCommentInSections
        )
    }
}

/// Course-level capability flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePrivileges {
    pub can_modify_course: bool,
    pub can_modify_instructor: bool,
    pub can_modify_session: bool,
    pub can_modify_student: bool,
    pub can_view_student_in_sections: bool,
    pub can_submit_session_in_sections: bool,
    pub can_view_session_in_sections: bool,
    pub can_modify_session_comment_in_sections: bool,
}

/// Capability flags that apply to one section only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPrivileges {
    pub can_view_student: bool,
    pub can_submit_session: bool,
    pub can_view_session: bool,
    pub can_modify_session_comment: bool,
}

impl CoursePrivileges {
    fn all() -> Self {
        Self {
            can_modify_course: true,
            can_modify_instructor: true,
            can_modify_session: true,
            can_modify_student: true,
            can_view_student_in_sections: true,
            can_submit_session_in_sections: true,
            can_view_session_in_sections: true,
            can_modify_session_comment_in_sections: true,
        }
    }

    fn get(&self, privilege: Privilege) -> bool {
        match privilege {
            Privilege::ModifyCourse => self.can_modify_course,
            Privilege::ModifyInstructor => self.can_modify_instructor,
            Privilege::ModifySession => self.can_modify_session,
            Privilege::ModifyStudent => self.can_modify_student,
            Privilege::ViewStudentInSections => self.can_view_student_in_sections,
            Privilege::SubmitSessionInSections => self.can_submit_session_in_sections,
            Privilege::ViewSessionInSections => self.can_view_session_in_sections,
            Privilege::ModifySessionCommentInSections => {
                self.can_modify_session_comment_in_sections
            }
        }
    }
}

impl SectionPrivileges {
    fn get(&self, privilege: Privilege) -> Option<bool> {
        match privilege {
            Privilege::ViewStudentInSections => Some(self.can_view_student),
            Privilege::SubmitSessionInSections => Some(self.can_submit_session),
            Privilege::ViewSessionInSections => Some(self.can_view_session),
            Privilege::ModifySessionCommentInSections => Some(self.can_modify_session_comment),
            _ => None,
        }
    }
}

/// Capabilities granted to one instructor within one course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructorPrivileges {
    course: CoursePrivileges,
    #[serde(default)]
    sections: BTreeMap<String, SectionPrivileges>,
}

impl InstructorPrivileges {
    pub fn new(course: CoursePrivileges) -> Self {
        Self {
            course,
            sections: BTreeMap::new(),
        }
    }

    /// Preset privileges for a permission role name. Unknown names and
    /// `Custom` grant nothing.
    pub fn for_role(role: &str) -> Self {
        let course = match role {
            instructor_roles::COOWNER => CoursePrivileges::all(),
            instructor_roles::MANAGER => CoursePrivileges {
                can_modify_course: false,
                ..CoursePrivileges::all()
            },
            instructor_roles::OBSERVER => CoursePrivileges {
                can_view_student_in_sections: true,
                can_view_session_in_sections: true,
                ..CoursePrivileges::default()
            },
            instructor_roles::TUTOR => CoursePrivileges {
                can_view_student_in_sections: true,
                can_submit_session_in_sections: true,
                can_view_session_in_sections: true,
                ..CoursePrivileges::default()
            },
            _ => CoursePrivileges::default(),
        };
        Self::new(course)
    }

    /// A copy of this set with the override for `section` replaced
    pub fn with_section(mut self, section: impl Into<String>, privileges: SectionPrivileges) -> Self {
        self.sections.insert(section.into(), privileges);
        self
    }

    pub fn course(&self) -> &CoursePrivileges {
        &self.course
    }

    pub fn sections(&self) -> &BTreeMap<String, SectionPrivileges> {
        &self.sections
    }

    pub fn is_allowed_for_course(&self, privilege: Privilege) -> bool {
        self.course.get(privilege)
    }

    /// Section overrides win for section-scoped privileges; everything else
    /// falls back to the course-level flag.
    pub fn is_allowed_for_section(&self, section: &str, privilege: Privilege) -> bool {
        if !privilege.is_section_scoped() {
            return self.course.get(privilege);
        }
        self.sections
            .get(section)
            .and_then(|s| s.get(privilege))
            .unwrap_or_else(|| self.course.get(privilege))
    }
}
