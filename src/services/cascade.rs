//! Cascade plans
//!
//! A cascade is an ordered list of single-key mutations, each paired with the
//! mutation that undoes it. The stores offer no cross-key transaction, so a
//! plan is applied one step at a time; when a step fails, the applied steps
//! are undone in reverse order and the failure is reported with its step
//! number.
//!
//! Membership record steps always run before directory steps, whatever order
//! they were added in. A reader of the directory can therefore see the old
//! role with old records or the new role with new records, but never the new
//! role over old records.

use std::fmt;

use tracing::{debug, error, warn};

use crate::{
    db::Stores,
    error::{AppError, AppResult},
    models::{InstructorRecord, Role, StudentRecord},
};

/// One single-key write against a store or the directory
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    PutStudent(StudentRecord),
    DeleteStudent { course_id: String, email: String },
    PutInstructor(InstructorRecord),
    DeleteInstructor { course_id: String, email: String },
    SetRole { account_id: String, course_id: String, role: Role },
    ClearRole { account_id: String, course_id: String },
}

impl Mutation {
    async fn apply(&self, stores: &Stores) -> AppResult<()> {
        match self {
            Self::PutStudent(record) => stores.students.put(record).await,
            Self::DeleteStudent { course_id, email } => {
                stores.students.delete(course_id, email).await
            }
            Self::PutInstructor(record) => stores.instructors.put(record).await,
            Self::DeleteInstructor { course_id, email } => {
                stores.instructors.delete(course_id, email).await
            }
            Self::SetRole {
                account_id,
                course_id,
                role,
            } => stores.directory.set_role(account_id, course_id, *role).await,
            Self::ClearRole {
                account_id,
                course_id,
            } => stores.directory.clear_role(account_id, course_id).await,
        }
    }

    fn restore_role(account_id: &str, course_id: &str, prior: Option<Role>) -> Self {
        match prior {
            Some(role) => Self::SetRole {
                account_id: account_id.to_string(),
                course_id: course_id.to_string(),
                role,
            },
            None => Self::ClearRole {
                account_id: account_id.to_string(),
                course_id: course_id.to_string(),
            },
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PutStudent(r) => write!(f, "put student {}/{}", r.course_id, r.email),
            Self::DeleteStudent { course_id, email } => {
                write!(f, "delete student {}/{}", course_id, email)
            }
            Self::PutInstructor(r) => write!(f, "put instructor {}/{}", r.course_id, r.email),
            Self::DeleteInstructor { course_id, email } => {
                write!(f, "delete instructor {}/{}", course_id, email)
            }
            Self::SetRole {
                account_id,
                course_id,
                role,
            } => write!(f, "set role {} for {} in {}", role, account_id, course_id),
            Self::ClearRole {
                account_id,
                course_id,
            } => write!(f, "clear role for {} in {}", account_id, course_id),
        }
    }
}

#[derive(Debug, Clone)]
struct Step {
    mutation: Mutation,
    undo: Option<Mutation>,
}

/// Ordered mutations of one role transition
#[derive(Debug, Default)]
pub struct CascadePlan {
    record_steps: Vec<Step>,
    directory_steps: Vec<Step>,
}

impl CascadePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.record_steps.len() + self.directory_steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Steps in execution order
    pub fn mutations(&self) -> impl Iterator<Item = &Mutation> {
        self.record_steps
            .iter()
            .chain(self.directory_steps.iter())
            .map(|s| &s.mutation)
    }

    /// Write `record`; `prior` is whatever was stored under its key
    pub fn put_student(&mut self, record: StudentRecord, prior: Option<StudentRecord>) {
        let undo = match prior {
            Some(prior) => Mutation::PutStudent(prior),
            None => Mutation::DeleteStudent {
                course_id: record.course_id.clone(),
                email: record.email.clone(),
            },
        };
        self.record_steps.push(Step {
            mutation: Mutation::PutStudent(record),
            undo: Some(undo),
        });
    }

    pub fn delete_student(&mut self, existing: StudentRecord) {
        self.record_steps.push(Step {
            mutation: Mutation::DeleteStudent {
                course_id: existing.course_id.clone(),
                email: existing.email.clone(),
            },
            undo: Some(Mutation::PutStudent(existing)),
        });
    }

    /// Write `record`; `prior` is whatever was stored under its key
    pub fn put_instructor(&mut self, record: InstructorRecord, prior: Option<InstructorRecord>) {
        let undo = match prior {
            Some(prior) => Mutation::PutInstructor(prior),
            None => Mutation::DeleteInstructor {
                course_id: record.course_id.clone(),
                email: record.email.clone(),
            },
        };
        self.record_steps.push(Step {
            mutation: Mutation::PutInstructor(record),
            undo: Some(undo),
        });
    }

    pub fn delete_instructor(&mut self, existing: InstructorRecord) {
        self.record_steps.push(Step {
            mutation: Mutation::DeleteInstructor {
                course_id: existing.course_id.clone(),
                email: existing.email.clone(),
            },
            undo: Some(Mutation::PutInstructor(existing)),
        });
    }

    pub fn set_role(&mut self, account_id: &str, course_id: &str, role: Role, prior: Option<Role>) {
        self.directory_steps.push(Step {
            mutation: Mutation::SetRole {
                account_id: account_id.to_string(),
                course_id: course_id.to_string(),
                role,
            },
            undo: Some(Mutation::restore_role(account_id, course_id, prior)),
        });
    }

    pub fn clear_role(&mut self, account_id: &str, course_id: &str, prior: Option<Role>) {
        self.directory_steps.push(Step {
            mutation: Mutation::ClearRole {
                account_id: account_id.to_string(),
                course_id: course_id.to_string(),
            },
            undo: prior.map(|role| Mutation::restore_role(account_id, course_id, Some(role))),
        });
    }

    /// Apply every step, undoing the applied ones if any step fails.
    ///
    /// On failure returns [`AppError::CascadeIncomplete`] with the 1-based
    /// number of the failed step. `rolled_back` is false when an undo step
    /// also failed; the stores are then left partially changed.
    pub async fn execute(self, stores: &Stores) -> AppResult<()> {
        let steps: Vec<Step> = self
            .record_steps
            .into_iter()
            .chain(self.directory_steps)
            .collect();
        let total = steps.len();

        for (index, step) in steps.iter().enumerate() {
            debug!(step = index + 1, total, "Applying {}", step.mutation);

            if let Err(e) = step.mutation.apply(stores).await {
                warn!(
                    step = index + 1,
                    total,
                    error = %e,
                    "Cascade step failed: {}; undoing {} applied step(s)",
                    step.mutation,
                    index
                );
                let rolled_back = Self::undo(&steps[..index], stores).await;

                return Err(AppError::CascadeIncomplete {
                    step: index + 1,
                    total,
                    reason: e.to_string(),
                    rolled_back,
                });
            }
        }

        Ok(())
    }

    async fn undo(applied: &[Step], stores: &Stores) -> bool {
        let mut clean = true;

        for step in applied.iter().rev() {
            let Some(undo) = &step.undo else {
                continue;
            };
            if let Err(e) = undo.apply(stores).await {
                error!(error = %e, "Could not undo cascade step ({}) with {}", step.mutation, undo);
                clean = false;
            }
        }

        clean
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::db::repositories::{
        InMemoryAccountDirectory, InMemoryInstructorStore, InMemoryStudentStore,
        MockStudentStore,
    };

    fn student() -> StudentRecord {
        StudentRecord::new("course-1", "stu@x.com", "Stu").with_account("acc-1")
    }

    #[tokio::test]
    async fn test_directory_steps_run_last() {
        let mut plan = CascadePlan::new();
        for course_id in ["course-1", "course-2"] {
            let student = StudentRecord::new(course_id, "stu@x.com", "Stu").with_account("acc-1");
            plan.put_instructor(
                InstructorRecord::promoted_from(&student, "Co-owner", "Instructor"),
                None,
            );
            plan.delete_student(student);
            plan.set_role("acc-1", course_id, Role::Instructor, Some(Role::Student));
        }

        let order: Vec<String> = plan.mutations().map(|m| m.to_string()).collect();
        assert_eq!(
            order,
            vec![
                "put instructor course-1/stu@x.com",
                "delete student course-1/stu@x.com",
                "put instructor course-2/stu@x.com",
                "delete student course-2/stu@x.com",
                "set role instructor for acc-1 in course-1",
                "set role instructor for acc-1 in course-2",
            ]
        );
        assert_eq!(plan.len(), 6);
    }

    #[tokio::test]
    async fn test_execute_applies_all_steps() {
        let stores = Stores::in_memory();
        stores.students.put(&student()).await.unwrap();
        stores
            .directory
            .set_role("acc-1", "course-1", Role::Student)
            .await
            .unwrap();

        let mut plan = CascadePlan::new();
        plan.put_instructor(
            InstructorRecord::promoted_from(&student(), "Co-owner", "Instructor"),
            None,
        );
        plan.delete_student(student());
        plan.set_role("acc-1", "course-1", Role::Instructor, Some(Role::Student));
        plan.execute(&stores).await.unwrap();

        assert!(stores.students.get("course-1", "stu@x.com").await.unwrap().is_none());
        assert!(stores.instructors.get("course-1", "stu@x.com").await.unwrap().is_some());
        assert!(stores.directory.has_role("acc-1", Role::Instructor).await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_step_is_reported_and_rolled_back() {
        let mut students = MockStudentStore::new();
        students
            .expect_delete()
            .times(1)
            .returning(|_, _| Err(AppError::StoreUnavailable("connection reset".into())));

        let stores = Stores::new(
            Arc::new(students),
            Arc::new(InMemoryInstructorStore::new()),
            Arc::new(InMemoryAccountDirectory::new()),
        );
        stores
            .directory
            .set_role("acc-1", "course-1", Role::Student)
            .await
            .unwrap();

        let mut plan = CascadePlan::new();
        plan.put_instructor(
            InstructorRecord::promoted_from(&student(), "Co-owner", "Instructor"),
            None,
        );
        plan.delete_student(student());
        plan.set_role("acc-1", "course-1", Role::Instructor, Some(Role::Student));

        let err = plan.execute(&stores).await.unwrap_err();
        match err {
            AppError::CascadeIncomplete {
                step,
                total,
                rolled_back,
                ..
            } => {
                assert_eq!(step, 2);
                assert_eq!(total, 3);
                assert!(rolled_back);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        // The instructor written in step 1 was removed again
        assert!(stores.instructors.get("course-1", "stu@x.com").await.unwrap().is_none());
        // The directory step never ran
        assert!(!stores.directory.has_role("acc-1", Role::Instructor).await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_undo_is_flagged() {
        let mut students = MockStudentStore::new();
        // Step 1 succeeds, its undo fails
        students.expect_put().times(1).returning(|_| Ok(()));
        students
            .expect_delete()
            .times(1)
            .returning(|_, _| Err(AppError::StoreUnavailable("gone".into())));

        let mut directory = crate::db::repositories::MockAccountDirectory::new();
        directory
            .expect_set_role()
            .times(1)
            .returning(|_, _, _| Err(AppError::StoreUnavailable("directory down".into())));

        let stores = Stores::new(
            Arc::new(students),
            Arc::new(InMemoryInstructorStore::new()),
            Arc::new(directory),
        );

        let mut plan = CascadePlan::new();
        plan.put_student(student(), None);
        plan.set_role("acc-1", "course-1", Role::Student, None);

        let err = plan.execute(&stores).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::CascadeIncomplete {
                step: 2,
                rolled_back: false,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_empty_plan_is_noop() {
        let stores = Stores::new(
            Arc::new(InMemoryStudentStore::new()),
            Arc::new(InMemoryInstructorStore::new()),
            Arc::new(InMemoryAccountDirectory::new()),
        );
        let plan = CascadePlan::new();
        assert!(plan.is_empty());
        plan.execute(&stores).await.unwrap();
    }
}
