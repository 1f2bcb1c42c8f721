//! Instructor repository

use async_trait::async_trait;
use sqlx::{types::Json, PgPool};

use crate::{error::AppResult, models::InstructorRecord};

use super::InstructorStore;

/// PostgreSQL-backed instructor store; privileges live in a JSONB column
#[derive(Clone)]
pub struct PgInstructorRepository {
    pool: PgPool,
}

impl PgInstructorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InstructorStore for PgInstructorRepository {
    async fn get(&self, course_id: &str, email: &str) -> AppResult<Option<InstructorRecord>> {
        let instructor = sqlx::query_as::<_, InstructorRecord>(
            r#"SELECT * FROM instructors WHERE course_id = $1 AND email = $2"#,
        )
        .bind(course_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(instructor)
    }

    async fn get_by_account(
        &self,
        course_id: &str,
        account_id: &str,
    ) -> AppResult<Option<InstructorRecord>> {
        let instructor = sqlx::query_as::<_, InstructorRecord>(
            r#"SELECT * FROM instructors WHERE course_id = $1 AND account_id = $2"#,
        )
        .bind(course_id)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(instructor)
    }

    async fn list_for_course(&self, course_id: &str) -> AppResult<Vec<InstructorRecord>> {
        let instructors = sqlx::query_as::<_, InstructorRecord>(
            r#"SELECT * FROM instructors WHERE course_id = $1 ORDER BY email"#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(instructors)
    }

    async fn put(&self, record: &InstructorRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO instructors (
                course_id, email, name, account_id, display_name, role,
                privileges, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (course_id, email) DO UPDATE
            SET
                name = EXCLUDED.name,
                account_id = EXCLUDED.account_id,
                display_name = EXCLUDED.display_name,
                role = EXCLUDED.role,
                privileges = EXCLUDED.privileges,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&record.course_id)
        .bind(&record.email)
        .bind(&record.name)
        .bind(&record.account_id)
        .bind(&record.display_name)
        .bind(&record.role)
        .bind(Json(&record.privileges))
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, course_id: &str, email: &str) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM instructors WHERE course_id = $1 AND email = $2"#)
            .bind(course_id)
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
