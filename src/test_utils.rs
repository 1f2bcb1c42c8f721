//! Test utilities: a typical data bundle and an in-memory application
//!
//! The bundle holds two courses. Course 1 has five registered students in
//! two teams and two co-owners; course 2 has one co-owner and shares a
//! student account with course 1.

use axum::Router;

use crate::{
    config::{
        Config, DatabaseConfig, LogFormat, RosterConfig, ServerConfig, StoreBackend, StoreConfig,
    },
    db::Stores,
    handlers,
    models::{InstructorRecord, Role, StudentRecord},
    state::AppState,
};

pub const COURSE1: &str = "idOfTypicalCourse1";
pub const COURSE2: &str = "idOfTypicalCourse2";

pub const STUDENT2_IN_COURSE1: &str = "student2InCourse1";
pub const INSTRUCTOR1_OF_COURSE1: &str = "idOfInstructor1OfCourse1";
pub const INSTRUCTOR2_OF_COURSE1: &str = "idOfInstructor2OfCourse1";
pub const INSTRUCTOR_OF_COURSE2: &str = "idOfInstructor3";

/// Typical courses, students and instructors
pub struct TypicalData {
    pub students: Vec<StudentRecord>,
    pub instructors: Vec<InstructorRecord>,
}

impl TypicalData {
    pub fn new() -> Self {
        let mut students: Vec<StudentRecord> = (1..=5)
            .map(|n| {
                let (team, section) = if n < 5 {
                    ("Team 1.1", "Section 1")
                } else {
                    ("Team 1.2", "Section 2")
                };
                StudentRecord::new(
                    COURSE1,
                    format!("student{}InCourse1@gmail.tmt", n),
                    format!("student{} In Course1", n),
                )
                .with_team(team)
                .with_section(section)
                .with_account(format!("student{}InCourse1", n))
            })
            .collect();

        students.push(
            StudentRecord::new(COURSE2, "student2InCourse1@gmail.tmt", "student2 In Course1")
                .with_team("Team 2.1")
                .with_section("Section 3")
                .with_account(STUDENT2_IN_COURSE1),
        );

        let instructors = vec![
            InstructorRecord::new(COURSE1, "instructor1@course1.tmt", "Instructor1 Course1")
                .with_account(INSTRUCTOR1_OF_COURSE1),
            InstructorRecord::new(COURSE1, "instructor2@course1.tmt", "Instructor2 Course1")
                .with_account(INSTRUCTOR2_OF_COURSE1),
            InstructorRecord::new(COURSE2, "instructor3@course2.tmt", "Instructor3 Course2")
                .with_account(INSTRUCTOR_OF_COURSE2),
        ];

        Self {
            students,
            instructors,
        }
    }

    /// Write the bundle and its directory entries into `stores`
    pub async fn seed(stores: &Stores) {
        let data = Self::new();

        for student in &data.students {
            stores.students.put(student).await.unwrap();
            if let Some(account_id) = &student.account_id {
                stores
                    .directory
                    .set_role(account_id, &student.course_id, Role::Student)
                    .await
                    .unwrap();
            }
        }

        for instructor in &data.instructors {
            stores.instructors.put(instructor).await.unwrap();
            if let Some(account_id) = &instructor.account_id {
                stores
                    .directory
                    .set_role(account_id, &instructor.course_id, Role::Instructor)
                    .await
                    .unwrap();
            }
        }
    }
}

/// Configuration for tests, independent of the environment
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            log_format: LogFormat::Pretty,
            request_timeout_secs: 5,
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
        },
        database: DatabaseConfig {
            url: None,
            max_connections: 1,
        },
        roster: RosterConfig::default(),
    }
}

/// Router over freshly seeded in-memory stores
pub async fn test_app() -> (Stores, Router) {
    let stores = Stores::in_memory();
    TypicalData::seed(&stores).await;
    let state = AppState::new(test_config(), stores.clone());
    (stores, handlers::router(state))
}
