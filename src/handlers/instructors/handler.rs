//! Instructor handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

use super::{
    request::{CreateInstructorRequest, UpdatePrivilegesRequest},
    response::{InstructorResponse, InstructorsListResponse},
};

/// List the instructors of a course
pub async fn list_instructors(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<Json<InstructorsListResponse>> {
    let instructors: Vec<InstructorResponse> = state
        .instructors()
        .get_instructors_for_course(&course_id)
        .await?
        .into_iter()
        .map(InstructorResponse::from)
        .collect();

    Ok(Json(InstructorsListResponse {
        course_id,
        total: instructors.len(),
        instructors,
    }))
}

/// Add an instructor to a course
pub async fn create_instructor(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Json(payload): Json<CreateInstructorRequest>,
) -> AppResult<(StatusCode, Json<InstructorResponse>)> {
    payload.validate()?;

    let instructor = state
        .instructors()
        .create_instructor(payload.into_record(&course_id))
        .await?;

    Ok((StatusCode::CREATED, Json(instructor.into())))
}

/// Get an instructor by email
pub async fn get_instructor(
    State(state): State<AppState>,
    Path((course_id, email)): Path<(String, String)>,
) -> AppResult<Json<InstructorResponse>> {
    let instructor = state
        .instructors()
        .get_instructor(&course_id, &email)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Instructor {} not found in course {}",
                email, course_id
            ))
        })?;

    Ok(Json(instructor.into()))
}

/// Remove an instructor from a course
pub async fn delete_instructor(
    State(state): State<AppState>,
    Path((course_id, email)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state
        .instructors()
        .delete_instructor(&course_id, &email)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Change an instructor's role or privileges
pub async fn update_privileges(
    State(state): State<AppState>,
    Path((course_id, email)): Path<(String, String)>,
    Json(payload): Json<UpdatePrivilegesRequest>,
) -> AppResult<Json<InstructorResponse>> {
    let instructor = match (payload.role, payload.privileges) {
        (Some(role), None) => {
            state
                .instructors()
                .update_role(&course_id, &email, &role)
                .await?
        }
        (None, Some(privileges)) => {
            state
                .instructors()
                .update_privileges(&course_id, &email, privileges)
                .await?
        }
        _ => {
            return Err(AppError::Validation(
                "Exactly one of role or privileges must be given".to_string(),
            ));
        }
    };

    Ok(Json(instructor.into()))
}
