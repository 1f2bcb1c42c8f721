//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{
    config::Config,
    db::Stores,
    services::{AccountsService, CourseService, InstructorService, StudentService},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    accounts: AccountsService,
    students: StudentService,
    instructors: InstructorService,
    courses: CourseService,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Build every service over the same stores
    pub fn new(config: Config, stores: Stores) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                accounts: AccountsService::new(stores.clone(), config.roster.clone()),
                students: StudentService::new(stores.clone()),
                instructors: InstructorService::new(stores.clone()),
                courses: CourseService::new(stores),
                config,
            }),
        }
    }

    pub fn accounts(&self) -> &AccountsService {
        &self.inner.accounts
    }

    pub fn students(&self) -> &StudentService {
        &self.inner.students
    }

    pub fn instructors(&self) -> &InstructorService {
        &self.inner.instructors
    }

    pub fn courses(&self) -> &CourseService {
        &self.inner.courses
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
