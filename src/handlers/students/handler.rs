//! Student handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::StudentUpdate,
    state::AppState,
};

use super::{
    request::{CreateStudentRequest, RegisterStudentRequest},
    response::{StudentResponse, StudentsListResponse},
};

/// List the students of a course
pub async fn list_students(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<Json<StudentsListResponse>> {
    let students: Vec<StudentResponse> = state
        .students()
        .get_students_for_course(&course_id)
        .await?
        .into_iter()
        .map(StudentResponse::from)
        .collect();

    Ok(Json(StudentsListResponse {
        course_id,
        total: students.len(),
        students,
    }))
}

/// Enroll a student in a course
pub async fn create_student(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Json(payload): Json<CreateStudentRequest>,
) -> AppResult<(StatusCode, Json<StudentResponse>)> {
    payload.validate()?;

    let student = state
        .students()
        .create_student(payload.into_record(&course_id))
        .await?;

    Ok((StatusCode::CREATED, Json(student.into())))
}

/// Get a student by email
pub async fn get_student(
    State(state): State<AppState>,
    Path((course_id, email)): Path<(String, String)>,
) -> AppResult<Json<StudentResponse>> {
    let student = state
        .students()
        .get_student(&course_id, &email)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Student {} not found in course {}", email, course_id))
        })?;

    Ok(Json(student.into()))
}

/// Update a student's name, comment, team or section
pub async fn update_student(
    State(state): State<AppState>,
    Path((course_id, email)): Path<(String, String)>,
    Json(payload): Json<StudentUpdate>,
) -> AppResult<Json<StudentResponse>> {
    let student = state
        .students()
        .update_student(&course_id, &email, payload)
        .await?;

    Ok(Json(student.into()))
}

/// Remove a student from a course
pub async fn delete_student(
    State(state): State<AppState>,
    Path((course_id, email)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state.students().delete_student(&course_id, &email).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Bind a student record to an account
pub async fn register_student(
    State(state): State<AppState>,
    Path((course_id, email)): Path<(String, String)>,
    Json(payload): Json<RegisterStudentRequest>,
) -> AppResult<Json<StudentResponse>> {
    payload.validate()?;

    let student = state
        .students()
        .register_student(&course_id, &email, &payload.account_id)
        .await?;

    Ok(Json(student.into()))
}
