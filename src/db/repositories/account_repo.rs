//! Account directory repository

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::{AppError, AppResult},
    models::{Account, Role},
};

use super::AccountDirectory;

/// PostgreSQL-backed account directory, one row per (account, course)
#[derive(Clone)]
pub struct PgAccountDirectory {
    pool: PgPool,
}

impl PgAccountDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountDirectory for PgAccountDirectory {
    async fn get(&self, account_id: &str) -> AppResult<Option<Account>> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"SELECT course_id, role FROM account_roles WHERE account_id = $1"#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        let mut account = Account::new(account_id);
        for (course_id, role) in rows {
            let role = Role::parse(&role).ok_or_else(|| {
                AppError::StoreUnavailable(format!(
                    "Unknown role '{}' stored for account {}",
                    role, account_id
                ))
            })?;
            account.roles.insert(course_id, role);
        }

        Ok(Some(account))
    }

    async fn set_role(&self, account_id: &str, course_id: &str, role: Role) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO account_roles (account_id, course_id, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (account_id, course_id) DO UPDATE SET role = EXCLUDED.role
            "#,
        )
        .bind(account_id)
        .bind(course_id)
        .bind(role.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn clear_role(&self, account_id: &str, course_id: &str) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM account_roles WHERE account_id = $1 AND course_id = $2"#)
            .bind(account_id)
            .bind(course_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn has_role(&self, account_id: &str, role: Role) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM account_roles
                WHERE account_id = $1 AND role = $2
            )
            "#,
        )
        .bind(account_id)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
