//! Student repository

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{error::AppResult, models::StudentRecord};

use super::StudentStore;

/// PostgreSQL-backed student store
#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentStore for PgStudentRepository {
    async fn get(&self, course_id: &str, email: &str) -> AppResult<Option<StudentRecord>> {
        let student = sqlx::query_as::<_, StudentRecord>(
            r#"SELECT * FROM students WHERE course_id = $1 AND email = $2"#,
        )
        .bind(course_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    async fn get_by_account(
        &self,
        course_id: &str,
        account_id: &str,
    ) -> AppResult<Option<StudentRecord>> {
        let student = sqlx::query_as::<_, StudentRecord>(
            r#"SELECT * FROM students WHERE course_id = $1 AND account_id = $2"#,
        )
        .bind(course_id)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    async fn list_for_course(&self, course_id: &str) -> AppResult<Vec<StudentRecord>> {
        let students = sqlx::query_as::<_, StudentRecord>(
            r#"SELECT * FROM students WHERE course_id = $1 ORDER BY email"#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    async fn put(&self, record: &StudentRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO students (
                course_id, email, name, comment, team_name, section_name,
                account_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (course_id, email) DO UPDATE
            SET
                name = EXCLUDED.name,
                comment = EXCLUDED.comment,
                team_name = EXCLUDED.team_name,
                section_name = EXCLUDED.section_name,
                account_id = EXCLUDED.account_id,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&record.course_id)
        .bind(&record.email)
        .bind(&record.name)
        .bind(&record.comment)
        .bind(&record.team_name)
        .bind(&record.section_name)
        .bind(&record.account_id)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, course_id: &str, email: &str) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM students WHERE course_id = $1 AND email = $2"#)
            .bind(course_id)
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
