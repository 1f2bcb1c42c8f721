//! Account handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{error::AppResult, models::TransitionReport, state::AppState};

use super::{
    request::PromoteQuery,
    response::{AccountCoursesResponse, InstructorStatusResponse},
};

/// Whether the account is an instructor of any course
pub async fn get_instructor_status(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> AppResult<Json<InstructorStatusResponse>> {
    let is_instructor = state.accounts().is_account_an_instructor(&account_id).await?;

    Ok(Json(InstructorStatusResponse {
        account_id,
        is_instructor,
    }))
}

/// Courses of the account with the role held in each
pub async fn get_account_courses(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> AppResult<Json<AccountCoursesResponse>> {
    let courses = state.courses().get_courses_for_account(&account_id).await?;

    Ok(Json(AccountCoursesResponse {
        account_id,
        courses,
    }))
}

/// Promote the account to instructor
pub async fn promote_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Query(query): Query<PromoteQuery>,
) -> AppResult<Json<TransitionReport>> {
    let report = state
        .accounts()
        .promote(&account_id, query.course_id.as_deref())
        .await?;

    Ok(Json(report))
}

/// Demote the account to student in every course it instructs
pub async fn downgrade_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> AppResult<Json<TransitionReport>> {
    let report = state
        .accounts()
        .downgrade_instructor_to_student_cascade(&account_id)
        .await?;

    Ok(Json(report))
}
