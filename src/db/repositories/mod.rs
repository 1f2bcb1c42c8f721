//! Membership stores and the account directory
//!
//! The services only see the traits below. Each store guarantees per-key
//! atomic reads and writes; nothing here spans keys, so multi-record changes
//! are coordinated by the services.

pub mod account_repo;
pub mod instructor_repo;
pub mod memory;
pub mod student_repo;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{Account, InstructorRecord, Role, StudentRecord},
};

pub use account_repo::PgAccountDirectory;
pub use instructor_repo::PgInstructorRepository;
pub use memory::{InMemoryAccountDirectory, InMemoryInstructorStore, InMemoryStudentStore};
pub use student_repo::PgStudentRepository;

/// Persistence for student records, keyed by (course, email)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn get(&self, course_id: &str, email: &str) -> AppResult<Option<StudentRecord>>;

    async fn get_by_account(
        &self,
        course_id: &str,
        account_id: &str,
    ) -> AppResult<Option<StudentRecord>>;

    /// All students of a course, ordered by email
    async fn list_for_course(&self, course_id: &str) -> AppResult<Vec<StudentRecord>>;

    /// Insert or replace the record under its key
    async fn put(&self, record: &StudentRecord) -> AppResult<()>;

    /// Remove the record; removing a missing key succeeds
    async fn delete(&self, course_id: &str, email: &str) -> AppResult<()>;
}

/// Persistence for instructor records, keyed by (course, email)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstructorStore: Send + Sync {
    async fn get(&self, course_id: &str, email: &str) -> AppResult<Option<InstructorRecord>>;

    async fn get_by_account(
        &self,
        course_id: &str,
        account_id: &str,
    ) -> AppResult<Option<InstructorRecord>>;

    /// All instructors of a course, ordered by email
    async fn list_for_course(&self, course_id: &str) -> AppResult<Vec<InstructorRecord>>;

    /// Insert or replace the record under its key
    async fn put(&self, record: &InstructorRecord) -> AppResult<()>;

    /// Remove the record; removing a missing key succeeds
    async fn delete(&self, course_id: &str, email: &str) -> AppResult<()>;
}

/// Index from account id to the role held in each course
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// The account and its roles; `None` once the last role is cleared
    async fn get(&self, account_id: &str) -> AppResult<Option<Account>>;

    /// Record `role` for the course, replacing any previous role there
    async fn set_role(&self, account_id: &str, course_id: &str, role: Role) -> AppResult<()>;

    /// Forget the account's role in the course; clearing a missing role succeeds
    async fn clear_role(&self, account_id: &str, course_id: &str) -> AppResult<()>;

    /// Whether the account holds `role` in any course
    async fn has_role(&self, account_id: &str, role: Role) -> AppResult<bool>;
}

/// The store handles every service is constructed with
#[derive(Clone)]
pub struct Stores {
    pub students: Arc<dyn StudentStore>,
    pub instructors: Arc<dyn InstructorStore>,
    pub directory: Arc<dyn AccountDirectory>,
}

impl Stores {
    pub fn new(
        students: Arc<dyn StudentStore>,
        instructors: Arc<dyn InstructorStore>,
        directory: Arc<dyn AccountDirectory>,
    ) -> Self {
        Self {
            students,
            instructors,
            directory,
        }
    }

    /// Process-local stores; contents are lost on restart
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryStudentStore::new()),
            Arc::new(InMemoryInstructorStore::new()),
            Arc::new(InMemoryAccountDirectory::new()),
        )
    }

    /// Stores backed by the PostgreSQL pool
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgStudentRepository::new(pool.clone())),
            Arc::new(PgInstructorRepository::new(pool.clone())),
            Arc::new(PgAccountDirectory::new(pool)),
        )
    }
}
