//! Instructor membership service

use chrono::Utc;
use tracing::{debug, info};
use validator::Validate;

use crate::{
    constants::instructor_roles,
    db::Stores,
    error::{AppError, AppResult},
    models::{InstructorPrivileges, InstructorRecord, Role},
    utils::{
        normalize_email, require_key, sanitize_string, validate_course_id,
        validation::{validate_instructor_role, validate_person_name},
    },
};

/// Creates, reads, updates and removes instructor records
pub struct InstructorService {
    stores: Stores,
}

impl InstructorService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Store a new instructor record and, when it names an account, record
    /// the account as an instructor of the course.
    pub async fn create_instructor(&self, record: InstructorRecord) -> AppResult<InstructorRecord> {
        let course_id = require_key("course_id", &record.course_id)?.to_string();
        let email = normalize_email(require_key("email", &record.email)?);

        validate_course_id(&course_id).map_err(|e| AppError::Validation(e.to_string()))?;
        validate_instructor_role(&record.role).map_err(|e| AppError::Validation(e.to_string()))?;
        let name = validate_person_name(&record.name)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let record = InstructorRecord {
            course_id,
            email,
            name,
            display_name: sanitize_string(&record.display_name),
            ..record
        };
        record.validate()?;

        if self
            .stores
            .instructors
            .get(&record.course_id, &record.email)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "Instructor {} already exists in course {}",
                record.email, record.course_id
            )));
        }

        if self
            .stores
            .students
            .get(&record.course_id, &record.email)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "{} is already a student of course {}",
                record.email, record.course_id
            )));
        }

        if let Some(account_id) = &record.account_id {
            let role = self
                .stores
                .directory
                .get(account_id)
                .await?
                .and_then(|account| account.role_in(&record.course_id));
            if let Some(role) = role {
                return Err(AppError::AlreadyExists(format!(
                    "Account {} is already a {} of course {}",
                    account_id, role, record.course_id
                )));
            }
        }

        self.stores.instructors.put(&record).await?;
        if let Some(account_id) = &record.account_id {
            self.stores
                .directory
                .set_role(account_id, &record.course_id, Role::Instructor)
                .await?;
        }

        info!(
            course_id = %record.course_id,
            email = %record.email,
            role = %record.role,
            "Instructor created"
        );

        Ok(record)
    }

    /// Remove an instructor record. Removing a record that does not exist
    /// succeeds.
    pub async fn delete_instructor(&self, course_id: &str, email: &str) -> AppResult<()> {
        let course_id = require_key("course_id", course_id)?;
        let email = normalize_email(require_key("email", email)?);

        let Some(existing) = self.stores.instructors.get(course_id, &email).await? else {
            debug!(course_id, email = %email, "Instructor to delete does not exist");
            return Ok(());
        };

        self.stores.instructors.delete(course_id, &email).await?;

        if let Some(account_id) = &existing.account_id {
            let holds_instructor_role = self
                .stores
                .directory
                .get(account_id)
                .await?
                .and_then(|account| account.role_in(course_id))
                == Some(Role::Instructor);
            if holds_instructor_role {
                self.stores.directory.clear_role(account_id, course_id).await?;
            }
        }

        info!(course_id, email = %email, "Instructor deleted");

        Ok(())
    }

    pub async fn get_instructor(
        &self,
        course_id: &str,
        email: &str,
    ) -> AppResult<Option<InstructorRecord>> {
        let course_id = require_key("course_id", course_id)?;
        let email = normalize_email(require_key("email", email)?);
        self.stores.instructors.get(course_id, &email).await
    }

    /// All instructors of the course, ordered by email
    pub async fn get_instructors_for_course(
        &self,
        course_id: &str,
    ) -> AppResult<Vec<InstructorRecord>> {
        let course_id = require_key("course_id", course_id)?;
        self.stores.instructors.list_for_course(course_id).await
    }

    /// Replace the instructor's privileges. Privileges that differ from the
    /// preset of the current role turn the role into `Custom`.
    pub async fn update_privileges(
        &self,
        course_id: &str,
        email: &str,
        privileges: InstructorPrivileges,
    ) -> AppResult<InstructorRecord> {
        let existing = self.require_instructor(course_id, email).await?;

        let mut updated = existing.with_privileges(privileges);
        if updated.privileges != InstructorPrivileges::for_role(&updated.role) {
            updated.role = instructor_roles::CUSTOM.to_string();
        }
        updated.updated_at = Utc::now();
        self.stores.instructors.put(&updated).await?;

        debug!(
            course_id = %updated.course_id,
            email = %updated.email,
            role = %updated.role,
            "Instructor privileges updated"
        );

        Ok(updated)
    }

    /// Give the instructor another permission role and its preset privileges
    pub async fn update_role(
        &self,
        course_id: &str,
        email: &str,
        role: &str,
    ) -> AppResult<InstructorRecord> {
        validate_instructor_role(role).map_err(|e| AppError::Validation(e.to_string()))?;
        let existing = self.require_instructor(course_id, email).await?;

        let mut updated = existing.with_role(role);
        updated.updated_at = Utc::now();
        self.stores.instructors.put(&updated).await?;

        info!(
            course_id = %updated.course_id,
            email = %updated.email,
            role,
            "Instructor role updated"
        );

        Ok(updated)
    }

    async fn require_instructor(&self, course_id: &str, email: &str) -> AppResult<InstructorRecord> {
        let course_id = require_key("course_id", course_id)?;
        let email = normalize_email(require_key("email", email)?);

        self.stores
            .instructors
            .get(course_id, &email)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Instructor {} not found in course {}",
                    email, course_id
                ))
            })
    }
}
