//! Course handler implementations

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, state::AppState};

use super::response::{SectionsResponse, TeamsResponse};

/// Teams of a course
pub async fn get_teams(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<Json<TeamsResponse>> {
    let teams = state.courses().get_teams_for_course(&course_id).await?;

    Ok(Json(TeamsResponse { course_id, teams }))
}

/// Sections of a course
pub async fn get_sections(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<Json<SectionsResponse>> {
    let sections = state.courses().get_sections_for_course(&course_id).await?;

    Ok(Json(SectionsResponse {
        course_id,
        sections,
    }))
}
