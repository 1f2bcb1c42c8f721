//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod accounts;
pub mod courses;
pub mod health;
pub mod instructors;
pub mod students;

use axum::Router;

use crate::{constants::API_BASE_PATH, state::AppState};

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(accounts::routes())
        .merge(students::routes())
        .merge(instructors::routes())
        .merge(courses::routes())
}

/// API routes mounted under the versioned base path, bound to `state`
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest(API_BASE_PATH, routes())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::test_utils::{self, test_app};

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (_, app) = test_app().await;

        let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["store"], "memory");
    }

    #[tokio::test]
    async fn test_promote_and_downgrade_over_http() {
        let (_, app) = test_app().await;
        let status_uri = "/api/v1/accounts/student2InCourse1/instructor";

        let (_, body) = send(&app, Method::GET, status_uri, None).await;
        assert_eq!(body["is_instructor"], false);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/accounts/student2InCourse1/promote",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "promotion");
        assert_eq!(body["courses"], json!([test_utils::COURSE1, test_utils::COURSE2]));

        let (_, body) = send(&app, Method::GET, status_uri, None).await;
        assert_eq!(body["is_instructor"], true);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/accounts/student2InCourse1/downgrade",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "demotion");

        let (_, body) = send(&app, Method::GET, status_uri, None).await;
        assert_eq!(body["is_instructor"], false);
    }

    #[tokio::test]
    async fn test_promote_single_course_over_http() {
        let (_, app) = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/accounts/student2InCourse1/promote?course_id=idOfTypicalCourse2",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["courses"], json!([test_utils::COURSE2]));

        let (_, body) = send(&app, Method::GET, "/api/v1/accounts/student2InCourse1/courses", None).await;
        assert_eq!(body["courses"][test_utils::COURSE1], "student");
        assert_eq!(body["courses"][test_utils::COURSE2], "instructor");
    }

    #[tokio::test]
    async fn test_promote_unknown_account_is_not_found() {
        let (_, app) = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/accounts/id-does-not-exist/promote",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_student_lifecycle_over_http() {
        let (_, app) = test_app().await;
        let students_uri = "/api/v1/courses/valid-course/students";
        let student_uri = "/api/v1/courses/valid-course/students/valid-fresh@email.com";

        let payload = json!({
            "email": "valid-fresh@email.com",
            "name": "valid student",
            "team_name": "validTeamName",
        });
        let (status, body) = send(&app, Method::POST, students_uri, Some(payload.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["team_name"], "validTeamName");
        assert_eq!(body["is_registered"], false);

        let (status, body) = send(&app, Method::POST, students_uri, Some(payload)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "ALREADY_EXISTS");

        let (status, body) = send(
            &app,
            Method::PUT,
            student_uri,
            Some(json!({ "team_name": "otherTeam" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["team_name"], "otherTeam");

        let (_, body) = send(&app, Method::GET, "/api/v1/courses/valid-course/teams", None).await;
        assert_eq!(body["teams"], json!(["otherTeam"]));

        let (status, _) = send(&app, Method::DELETE, student_uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::DELETE, student_uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Method::GET, student_uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_student_invalid_payload() {
        let (_, app) = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/courses/valid-course/students",
            Some(json!({ "email": "not-an-email", "name": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_register_student_over_http() {
        let (_, app) = test_app().await;

        send(
            &app,
            Method::POST,
            "/api/v1/courses/valid-course/students",
            Some(json!({ "email": "valid-fresh@email.com", "name": "valid student" })),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/courses/valid-course/students/valid-fresh@email.com/register",
            Some(json!({ "account_id": "fresh-account" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["account_id"], "fresh-account");
    }

    #[tokio::test]
    async fn test_instructors_over_http() {
        let (_, app) = test_app().await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/courses/idOfTypicalCourse1/instructors",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/courses/idOfTypicalCourse1/instructors",
            Some(json!({
                "email": "tutor@course1.tmt",
                "name": "New Tutor",
                "role": "Tutor",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["role"], "Tutor");
        assert_eq!(body["display_name"], "Instructor");

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/courses/idOfTypicalCourse1/instructors/tutor@course1.tmt/privileges",
            Some(json!({ "role": "Manager" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role"], "Manager");
        assert_eq!(body["privileges"]["course"]["can_modify_student"], true);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/v1/courses/idOfTypicalCourse1/instructors/tutor@course1.tmt/privileges",
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::DELETE,
            "/api/v1/courses/idOfTypicalCourse1/instructors/tutor@course1.tmt",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_sections_over_http() {
        let (_, app) = test_app().await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/courses/idOfTypicalCourse1/sections",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sections"], json!(["Section 1", "Section 2"]));
    }
}
