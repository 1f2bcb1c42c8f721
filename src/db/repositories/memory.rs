//! In-memory stores
//!
//! Used by tests and by the `memory` store backend. Each map sits behind its
//! own lock, so a single put/get/delete is atomic but nothing spans stores.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::{Account, InstructorRecord, Role, StudentRecord},
};

use super::{AccountDirectory, InstructorStore, StudentStore};

type MembershipKey = (String, String);

fn key(course_id: &str, email: &str) -> MembershipKey {
    (course_id.to_string(), email.to_string())
}

/// Student records held in a map ordered by (course, email)
#[derive(Default)]
pub struct InMemoryStudentStore {
    records: RwLock<BTreeMap<MembershipKey, StudentRecord>>,
}

impl InMemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn get(&self, course_id: &str, email: &str) -> AppResult<Option<StudentRecord>> {
        Ok(self.records.read().await.get(&key(course_id, email)).cloned())
    }

    async fn get_by_account(
        &self,
        course_id: &str,
        account_id: &str,
    ) -> AppResult<Option<StudentRecord>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|s| s.course_id == course_id && s.account_id.as_deref() == Some(account_id))
            .cloned())
    }

    async fn list_for_course(&self, course_id: &str) -> AppResult<Vec<StudentRecord>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|s| s.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn put(&self, record: &StudentRecord) -> AppResult<()> {
        self.records
            .write()
            .await
            .insert(key(&record.course_id, &record.email), record.clone());
        Ok(())
    }

    async fn delete(&self, course_id: &str, email: &str) -> AppResult<()> {
        self.records.write().await.remove(&key(course_id, email));
        Ok(())
    }
}

/// Instructor records held in a map ordered by (course, email)
#[derive(Default)]
pub struct InMemoryInstructorStore {
    records: RwLock<BTreeMap<MembershipKey, InstructorRecord>>,
}

impl InMemoryInstructorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InstructorStore for InMemoryInstructorStore {
    async fn get(&self, course_id: &str, email: &str) -> AppResult<Option<InstructorRecord>> {
        Ok(self.records.read().await.get(&key(course_id, email)).cloned())
    }

    async fn get_by_account(
        &self,
        course_id: &str,
        account_id: &str,
    ) -> AppResult<Option<InstructorRecord>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|i| i.course_id == course_id && i.account_id.as_deref() == Some(account_id))
            .cloned())
    }

    async fn list_for_course(&self, course_id: &str) -> AppResult<Vec<InstructorRecord>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|i| i.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn put(&self, record: &InstructorRecord) -> AppResult<()> {
        self.records
            .write()
            .await
            .insert(key(&record.course_id, &record.email), record.clone());
        Ok(())
    }

    async fn delete(&self, course_id: &str, email: &str) -> AppResult<()> {
        self.records.write().await.remove(&key(course_id, email));
        Ok(())
    }
}

/// Account directory held in a map; an account disappears with its last role
#[derive(Default)]
pub struct InMemoryAccountDirectory {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn get(&self, account_id: &str) -> AppResult<Option<Account>> {
        Ok(self.accounts.read().await.get(account_id).cloned())
    }

    async fn set_role(&self, account_id: &str, course_id: &str, role: Role) -> AppResult<()> {
        self.accounts
            .write()
            .await
            .entry(account_id.to_string())
            .or_insert_with(|| Account::new(account_id))
            .roles
            .insert(course_id.to_string(), role);
        Ok(())
    }

    async fn clear_role(&self, account_id: &str, course_id: &str) -> AppResult<()> {
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.get_mut(account_id) {
            account.roles.remove(course_id);
            if account.roles.is_empty() {
                accounts.remove(account_id);
            }
        }
        Ok(())
    }

    async fn has_role(&self, account_id: &str, role: Role) -> AppResult<bool> {
        Ok(self
            .accounts
            .read()
            .await
            .get(account_id)
            .is_some_and(|a| a.has_role(role)))
    }
}
