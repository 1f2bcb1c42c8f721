//! Course-level views over memberships

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    db::Stores,
    error::AppResult,
    models::Role,
    utils::require_key,
};

/// Read-only queries across the records of a course
pub struct CourseService {
    stores: Stores,
}

impl CourseService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// Distinct team names of the course's students, sorted
    pub async fn get_teams_for_course(&self, course_id: &str) -> AppResult<BTreeSet<String>> {
        let course_id = require_key("course_id", course_id)?;
        let teams = self
            .stores
            .students
            .list_for_course(course_id)
            .await?
            .into_iter()
            .map(|s| s.team_name)
            .collect();

        Ok(teams)
    }

    /// Distinct section names of the course's students, sorted
    pub async fn get_sections_for_course(&self, course_id: &str) -> AppResult<BTreeSet<String>> {
        let course_id = require_key("course_id", course_id)?;
        let sections = self
            .stores
            .students
            .list_for_course(course_id)
            .await?
            .into_iter()
            .map(|s| s.section_name)
            .collect();

        Ok(sections)
    }

    /// Role held by the account in each of its courses; empty for an
    /// unknown account
    pub async fn get_courses_for_account(&self, account_id: &str) -> AppResult<BTreeMap<String, Role>> {
        let account_id = require_key("account_id", account_id)?;
        let courses = self
            .stores
            .directory
            .get(account_id)
            .await?
            .map(|account| account.roles)
            .unwrap_or_default();

        Ok(courses)
    }
}
