//! Account role transitions
//!
//! Promotion turns an account's student memberships into instructor
//! memberships; the downgrade cascade does the reverse for every course the
//! account instructs. Both build a [`CascadePlan`] from the current state and
//! apply it, so a failed store write leaves the records as they were.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info, warn};

use crate::{
    config::RosterConfig,
    db::Stores,
    error::{AppError, AppResult},
    models::{Advisory, InstructorRecord, Role, TransitionKind, TransitionReport},
    utils::require_key,
};

use super::cascade::CascadePlan;

/// One async mutex per account id, held for the length of a transition.
/// An entry lives only while some caller holds or waits for it.
#[derive(Default)]
struct AccountLocks {
    inner: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl AccountLocks {
    async fn acquire(&self, account_id: &str) -> AccountGuard<'_> {
        let lock = {
            let mut locks = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry(account_id.to_string()).or_default().clone()
        };

        AccountGuard {
            locks: self,
            account_id: account_id.to_string(),
            guard: Some(lock.lock_owned().await),
        }
    }

    fn release(&self, account_id: &str) {
        let mut locks = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        // Only the map's own handle left: nobody holds or waits for it
        if locks
            .get(account_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(account_id);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

struct AccountGuard<'a> {
    locks: &'a AccountLocks,
    account_id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for AccountGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        self.locks.release(&self.account_id);
    }
}

/// Promotes and demotes accounts between the student and instructor roles
pub struct AccountsService {
    stores: Stores,
    roster: RosterConfig,
    locks: AccountLocks,
}

impl AccountsService {
    pub fn new(stores: Stores, roster: RosterConfig) -> Self {
        Self {
            stores,
            roster,
            locks: AccountLocks::default(),
        }
    }

    /// Whether the account instructs any course. Unknown accounts are not
    /// instructors.
    pub async fn is_account_an_instructor(&self, account_id: &str) -> AppResult<bool> {
        let account_id = require_key("account_id", account_id)?;
        self.stores
            .directory
            .has_role(account_id, Role::Instructor)
            .await
    }

    /// Promote the account in every course where it is a student
    pub async fn make_account_instructor(&self, account_id: &str) -> AppResult<TransitionReport> {
        self.promote(account_id, None).await
    }

    /// Promote the account to instructor, in one course or in every course
    /// where it is a student.
    ///
    /// Courses the account already instructs are left alone; promoting an
    /// account that instructs everywhere it is a member returns an empty
    /// report.
    pub async fn promote(
        &self,
        account_id: &str,
        course_id: Option<&str>,
    ) -> AppResult<TransitionReport> {
        let account_id = require_key("account_id", account_id)?;
        let _guard = self.locks.acquire(account_id).await;

        let account = self
            .stores
            .directory
            .get(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account {} does not exist", account_id)))?;

        let targets = match course_id {
            Some(course_id) => {
                let course_id = require_key("course_id", course_id)?;
                match account.role_in(course_id) {
                    Some(Role::Student) => vec![course_id.to_string()],
                    Some(Role::Instructor) => Vec::new(),
                    None => {
                        return Err(AppError::NotFound(format!(
                            "Account {} is not a member of course {}",
                            account_id, course_id
                        )));
                    }
                }
            }
            None => account.courses_with(Role::Student),
        };

        let mut report = TransitionReport::new(account_id, TransitionKind::Promotion);
        let mut plan = CascadePlan::new();

        for course_id in &targets {
            let student = self
                .stores
                .students
                .get_by_account(course_id, account_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "No student record for account {} in course {}",
                        account_id, course_id
                    ))
                })?;

            // An instructor record already under this email is reused and
            // bound to the account; one owned by another account blocks
            match self.stores.instructors.get(course_id, &student.email).await? {
                None => {
                    let instructor = InstructorRecord::promoted_from(
                        &student,
                        &self.roster.default_instructor_role,
                        &self.roster.default_instructor_display_name,
                    );
                    plan.put_instructor(instructor, None);
                }
                Some(existing) => match existing.account_id.as_deref() {
                    None => {
                        let bound = existing.clone().with_account(account_id);
                        plan.put_instructor(bound, Some(existing));
                    }
                    Some(owner) if owner == account_id => {}
                    Some(owner) => {
                        return Err(AppError::AlreadyExists(format!(
                            "Instructor {} in course {} belongs to account {}",
                            existing.email, course_id, owner
                        )));
                    }
                },
            }
            plan.delete_student(student);
            plan.set_role(account_id, course_id, Role::Instructor, Some(Role::Student));
            report.courses.push(course_id.clone());
        }

        if plan.is_empty() {
            debug!(account_id, "Account is already an instructor, nothing to promote");
            return Ok(report);
        }

        plan.execute(&self.stores).await?;

        info!(
            account_id,
            courses = ?report.courses,
            "Promoted account to instructor"
        );

        Ok(report)
    }

    /// Demote the account to student in every course it instructs.
    ///
    /// Each instructor record is replaced by a student record with the
    /// default team and section, unless one already exists under the same
    /// email. Courses left without an instructor or a co-owner are reported
    /// as advisories.
    pub async fn downgrade_instructor_to_student_cascade(
        &self,
        account_id: &str,
    ) -> AppResult<TransitionReport> {
        let account_id = require_key("account_id", account_id)?;
        let _guard = self.locks.acquire(account_id).await;

        let courses = self
            .stores
            .directory
            .get(account_id)
            .await?
            .map(|account| account.courses_with(Role::Instructor))
            .unwrap_or_default();

        if courses.is_empty() {
            return Err(AppError::NotFound(format!(
                "Account {} is not an instructor of any course",
                account_id
            )));
        }

        let mut report = TransitionReport::new(account_id, TransitionKind::Demotion);
        let mut plan = CascadePlan::new();

        for course_id in &courses {
            let Some(instructor) = self
                .stores
                .instructors
                .get_by_account(course_id, account_id)
                .await?
            else {
                warn!(
                    account_id,
                    course_id = %course_id,
                    "Directory lists an instructor role without a record; clearing it"
                );
                plan.clear_role(account_id, course_id, Some(Role::Instructor));
                report.advisories.push(Advisory::MissingMembershipRecord {
                    course_id: course_id.clone(),
                });
                report.courses.push(course_id.clone());
                continue;
            };

            match self.stores.students.get(course_id, &instructor.email).await? {
                None => plan.put_student(instructor.demoted(), None),
                Some(existing) => match existing.account_id.as_deref() {
                    None => {
                        let bound = existing.clone().with_account(account_id);
                        plan.put_student(bound, Some(existing));
                    }
                    Some(owner) if owner == account_id => {}
                    Some(owner) => {
                        return Err(AppError::AlreadyExists(format!(
                            "Student {} in course {} belongs to account {}",
                            existing.email, course_id, owner
                        )));
                    }
                },
            }

            if let Some(advisory) = self.ownership_after_removal(&instructor).await? {
                report.advisories.push(advisory);
            }

            plan.delete_instructor(instructor);
            plan.set_role(account_id, course_id, Role::Student, Some(Role::Instructor));
            report.courses.push(course_id.clone());
        }

        plan.execute(&self.stores).await?;

        for advisory in &report.advisories {
            warn!(account_id, "Downgrade advisory: {}", advisory);
        }
        info!(
            account_id,
            courses = ?report.courses,
            "Downgraded instructor to student"
        );

        Ok(report)
    }

    /// Ownership problem the course would have once `leaving` is removed
    async fn ownership_after_removal(
        &self,
        leaving: &InstructorRecord,
    ) -> AppResult<Option<Advisory>> {
        let remaining: Vec<InstructorRecord> = self
            .stores
            .instructors
            .list_for_course(&leaving.course_id)
            .await?
            .into_iter()
            .filter(|i| i.email != leaving.email)
            .collect();

        let advisory = if remaining.is_empty() {
            Some(Advisory::CourseWithoutInstructor {
                course_id: leaving.course_id.clone(),
            })
        } else if leaving.is_coowner() && !remaining.iter().any(InstructorRecord::is_coowner) {
            Some(Advisory::CourseWithoutCoOwner {
                course_id: leaving.course_id.clone(),
            })
        } else {
            None
        };

        Ok(advisory)
    }
}
