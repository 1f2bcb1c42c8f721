//! Student membership service

use tracing::{debug, info};
use validator::Validate;

use crate::{
    db::Stores,
    error::{AppError, AppResult},
    models::{Role, StudentRecord, StudentUpdate},
    utils::{
        normalize_email, require_key, sanitize_string, validate_course_id,
        validation::validate_person_name,
    },
};

/// Creates, reads, updates and removes student records
pub struct StudentService {
    stores: Stores,
}

impl StudentService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Store a new student record and, when it names an account, record the
    /// account as a student of the course.
    pub async fn create_student(&self, record: StudentRecord) -> AppResult<StudentRecord> {
        let course_id = require_key("course_id", &record.course_id)?.to_string();
        let email = normalize_email(require_key("email", &record.email)?);

        validate_course_id(&course_id).map_err(|e| AppError::Validation(e.to_string()))?;
        let name = validate_person_name(&record.name)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let record = StudentRecord {
            course_id,
            email,
            name,
            comment: sanitize_string(&record.comment),
            ..record
        };
        record.validate()?;

        if self
            .stores
            .students
            .get(&record.course_id, &record.email)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "Student {} already exists in course {}",
                record.email, record.course_id
            )));
        }

        if self
            .stores
            .instructors
            .get(&record.course_id, &record.email)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "{} is already an instructor of course {}",
                record.email, record.course_id
            )));
        }

        if let Some(account_id) = &record.account_id {
            self.ensure_not_member(account_id, &record.course_id).await?;
        }

        self.stores.students.put(&record).await?;
        if let Some(account_id) = &record.account_id {
            self.stores
                .directory
                .set_role(account_id, &record.course_id, Role::Student)
                .await?;
        }

        info!(
            course_id = %record.course_id,
            email = %record.email,
            "Student created"
        );

        Ok(record)
    }

    /// Remove a student record. Removing a record that does not exist
    /// succeeds.
    pub async fn delete_student(&self, course_id: &str, email: &str) -> AppResult<()> {
        let course_id = require_key("course_id", course_id)?;
        let email = normalize_email(require_key("email", email)?);

        let Some(existing) = self.stores.students.get(course_id, &email).await? else {
            debug!(course_id, email = %email, "Student to delete does not exist");
            return Ok(());
        };

        self.stores.students.delete(course_id, &email).await?;

        if let Some(account_id) = &existing.account_id {
            let holds_student_role = self
                .stores
                .directory
                .get(account_id)
                .await?
                .and_then(|account| account.role_in(course_id))
                == Some(Role::Student);
            if holds_student_role {
                self.stores.directory.clear_role(account_id, course_id).await?;
            }
        }

        info!(course_id, email = %email, "Student deleted");

        Ok(())
    }

    pub async fn get_student(&self, course_id: &str, email: &str) -> AppResult<Option<StudentRecord>> {
        let course_id = require_key("course_id", course_id)?;
        let email = normalize_email(require_key("email", email)?);
        self.stores.students.get(course_id, &email).await
    }

    /// All students of the course, ordered by email
    pub async fn get_students_for_course(&self, course_id: &str) -> AppResult<Vec<StudentRecord>> {
        let course_id = require_key("course_id", course_id)?;
        self.stores.students.list_for_course(course_id).await
    }

    pub async fn get_student_for_account(
        &self,
        course_id: &str,
        account_id: &str,
    ) -> AppResult<Option<StudentRecord>> {
        let course_id = require_key("course_id", course_id)?;
        let account_id = require_key("account_id", account_id)?;
        self.stores.students.get_by_account(course_id, account_id).await
    }

    /// Change the name, comment, team or section of a student
    pub async fn update_student(
        &self,
        course_id: &str,
        email: &str,
        update: StudentUpdate,
    ) -> AppResult<StudentRecord> {
        let course_id = require_key("course_id", course_id)?;
        let email = normalize_email(require_key("email", email)?);
        update.validate()?;

        let existing = self
            .stores
            .students
            .get(course_id, &email)
            .await?
            .ok_or_else(|| Self::not_found(course_id, &email))?;

        let updated = update.apply(existing);
        updated.validate()?;
        self.stores.students.put(&updated).await?;

        debug!(course_id, email = %email, team = %updated.team_name, "Student updated");

        Ok(updated)
    }

    /// Bind an unregistered student record to an account
    pub async fn register_student(
        &self,
        course_id: &str,
        email: &str,
        account_id: &str,
    ) -> AppResult<StudentRecord> {
        let course_id = require_key("course_id", course_id)?;
        let email = normalize_email(require_key("email", email)?);
        let account_id = require_key("account_id", account_id)?;

        let existing = self
            .stores
            .students
            .get(course_id, &email)
            .await?
            .ok_or_else(|| Self::not_found(course_id, &email))?;

        match existing.account_id.as_deref() {
            Some(bound) if bound == account_id => return Ok(existing),
            Some(_) => {
                return Err(AppError::AlreadyExists(format!(
                    "Student {} in course {} is already registered to another account",
                    email, course_id
                )));
            }
            None => {}
        }

        self.ensure_not_member(account_id, course_id).await?;

        let mut registered = existing.with_account(account_id);
        registered.updated_at = chrono::Utc::now();
        self.stores.students.put(&registered).await?;
        self.stores
            .directory
            .set_role(account_id, course_id, Role::Student)
            .await?;

        info!(course_id, email = %email, account_id, "Student registered");

        Ok(registered)
    }

    async fn ensure_not_member(&self, account_id: &str, course_id: &str) -> AppResult<()> {
        let role = self
            .stores
            .directory
            .get(account_id)
            .await?
            .and_then(|account| account.role_in(course_id));

        match role {
            Some(role) => Err(AppError::AlreadyExists(format!(
                "Account {} is already a {} of course {}",
                account_id, role, course_id
            ))),
            None => Ok(()),
        }
    }

    fn not_found(course_id: &str, email: &str) -> AppError {
        AppError::NotFound(format!("Student {} not found in course {}", email, course_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{self, TypicalData};

    async fn typical() -> (Stores, StudentService) {
        let stores = Stores::in_memory();
        TypicalData::seed(&stores).await;
        (stores.clone(), StudentService::new(stores))
    }

    fn fresh_student() -> StudentRecord {
        StudentRecord::new("valid-course", "valid-fresh@email.com", "valid student")
            .with_comment("")
            .with_team("validTeamName")
            .with_section("validSectionName")
    }

    #[tokio::test]
    async fn test_create_then_delete_student() {
        let (_, service) = typical().await;

        let created = service.create_student(fresh_student()).await.unwrap();
        assert_eq!(created.email, "valid-fresh@email.com");
        assert!(service
            .get_student("valid-course", "valid-fresh@email.com")
            .await
            .unwrap()
            .is_some());

        service
            .delete_student("valid-course", "valid-fresh@email.com")
            .await
            .unwrap();
        assert!(service
            .get_student("valid-course", "valid-fresh@email.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_create_registered_student_updates_directory() {
        let (stores, service) = typical().await;

        service
            .create_student(fresh_student().with_account("fresh-account"))
            .await
            .unwrap();
        let account = stores.directory.get("fresh-account").await.unwrap().unwrap();
        assert_eq!(account.role_in("valid-course"), Some(Role::Student));

        service
            .delete_student("valid-course", "valid-fresh@email.com")
            .await
            .unwrap();
        assert!(stores.directory.get("fresh-account").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_student() {
        let (_, service) = typical().await;

        service.create_student(fresh_student()).await.unwrap();
        let err = service
            .create_student(fresh_student().with_team("otherTeam"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));

        let original = service
            .get_student("valid-course", "valid-fresh@email.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(original.team_name, "validTeamName");
    }

    #[tokio::test]
    async fn test_create_student_for_existing_instructor_account() {
        let (_, service) = typical().await;

        let record = StudentRecord::new(test_utils::COURSE1, "other@email.com", "Other")
            .with_account(test_utils::INSTRUCTOR1_OF_COURSE1);
        let err = service.create_student(record).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_create_student_with_instructor_email() {
        let (stores, service) = typical().await;

        let record = StudentRecord::new(test_utils::COURSE1, "instructor1@course1.tmt", "Someone");
        let err = service.create_student(record).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));
        assert!(stores
            .students
            .get(test_utils::COURSE1, "instructor1@course1.tmt")
            .await
            .unwrap()
            .is_none());

        // The same email is free in a course it does not instruct
        let record = StudentRecord::new(test_utils::COURSE2, "instructor1@course1.tmt", "Someone");
        service.create_student(record).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_student_invalid_fields() {
        let (_, service) = typical().await;

        let mut record = fresh_student();
        record.name = "   ".to_string();
        let err = service.create_student(record).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let mut record = fresh_student();
        record.email = "invalid email".to_string();
        let err = service.create_student(record).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let mut record = fresh_student();
        record.course_id = "invalid course id".to_string();
        let err = service.create_student(record).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let mut record = fresh_student();
        record.course_id = String::new();
        let err = service.create_student(record).await.unwrap_err();
        assert!(matches!(err, AppError::InvariantViolation(_)));

        let mut record = fresh_student();
        record.email = String::new();
        let err = service.create_student(record).await.unwrap_err();
        assert!(matches!(err, AppError::InvariantViolation(_)));
    }

    #[tokio::test]
    async fn test_delete_student_idempotent() {
        let (_, service) = typical().await;

        service
            .delete_student("valid-course", "non-existent@email.com")
            .await
            .unwrap();
        service
            .delete_student(test_utils::COURSE1, "student1InCourse1@gmail.tmt")
            .await
            .unwrap();
        service
            .delete_student(test_utils::COURSE1, "student1InCourse1@gmail.tmt")
            .await
            .unwrap();

        let err = service.delete_student("", "a@b.com").await.unwrap_err();
        assert!(matches!(err, AppError::InvariantViolation(_)));
        let err = service.delete_student("valid-course", "").await.unwrap_err();
        assert!(matches!(err, AppError::InvariantViolation(_)));
    }

    #[tokio::test]
    async fn test_update_student() {
        let (_, service) = typical().await;

        let updated = service
            .update_student(
                test_utils::COURSE1,
                "student1InCourse1@gmail.tmt",
                StudentUpdate::team("Team 1.9"),
            )
            .await
            .unwrap();
        assert_eq!(updated.team_name, "Team 1.9");

        let err = service
            .update_student(test_utils::COURSE1, "nobody@gmail.tmt", StudentUpdate::team("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = service
            .update_student(
                test_utils::COURSE1,
                "student1InCourse1@gmail.tmt",
                StudentUpdate::team(""),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_student() {
        let (stores, service) = typical().await;

        service.create_student(fresh_student()).await.unwrap();
        let registered = service
            .register_student("valid-course", "valid-fresh@email.com", "fresh-account")
            .await
            .unwrap();
        assert!(registered.is_registered());
        assert!(stores
            .directory
            .get("fresh-account")
            .await
            .unwrap()
            .is_some_and(|a| a.role_in("valid-course") == Some(Role::Student)));

        // Same account again is accepted
        service
            .register_student("valid-course", "valid-fresh@email.com", "fresh-account")
            .await
            .unwrap();

        let err = service
            .register_student("valid-course", "valid-fresh@email.com", "someone-else")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists(_)));

        let found = service
            .get_student_for_account("valid-course", "fresh-account")
            .await
            .unwrap();
        assert_eq!(found.map(|s| s.email), Some("valid-fresh@email.com".to_string()));
    }

    #[tokio::test]
    async fn test_get_students_for_course() {
        let (_, service) = typical().await;

        let students = service
            .get_students_for_course(test_utils::COURSE1)
            .await
            .unwrap();
        assert_eq!(students.len(), 5);
        assert!(service
            .get_students_for_course("idOfUnknownCourse")
            .await
            .unwrap()
            .is_empty());
    }
}
