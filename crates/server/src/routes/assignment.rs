use crate::{
    auth::CurrentUser,
    dtos::{
        assignment::{AssignmentResponse, ParseAssignmentsRequest, ParseAssignmentsResponse},
        course::DeleteResponse,
    },
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use canvas_parser::parse_assignment_text;
use database::services::{assignment::AssignmentService, course::CourseService};
use log::debug;
use uuid::Uuid;

/// List the assignments of a course
#[utoipa::path(
    get,
    path = "/courses/{id}/assignments",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Assignments, earliest due first", body = Vec<AssignmentResponse>),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Assignments"
)]
pub async fn list_course_assignments(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AssignmentResponse>>, ApiError> {
    if CourseService::find_owned(&state.db, &owner, id).await?.is_none() {
        return Err(ApiError::not_found("Course not found"));
    }

    let assignments = AssignmentService::list_for_course(&state.db, id).await?;

    Ok(Json(assignments.into_iter().map(Into::into).collect()))
}

/// Create assignments from text pasted out of Canvas
#[utoipa::path(
    post,
    path = "/assignments/parse",
    request_body = ParseAssignmentsRequest,
    responses(
        (status = 200, description = "Assignments created", body = ParseAssignmentsResponse),
        (status = 400, description = "Missing input or nothing recognized", body = ErrorResponse),
        (status = 403, description = "Course not found or access denied", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Assignments"
)]
pub async fn parse_assignments(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    Json(request): Json<ParseAssignmentsRequest>,
) -> Result<Json<ParseAssignmentsResponse>, ApiError> {
    let (course_id, text) = request
        .validate()
        .ok_or_else(|| ApiError::bad_request("Course ID and text are required"))?;

    if CourseService::find_owned(&state.db, &owner, course_id)
        .await?
        .is_none()
    {
        return Err(ApiError::forbidden("Course not found or access denied"));
    }

    let parsed = parse_assignment_text(text);
    debug!("Recognized {} assignments in pasted text", parsed.len());

    if parsed.is_empty() {
        return Err(ApiError::bad_request("No assignments found in text"));
    }

    let saved = AssignmentService::save_parsed(&state.db, course_id, parsed).await?;

    Ok(Json(ParseAssignmentsResponse {
        count: saved.len(),
        assignments: saved.into_iter().map(Into::into).collect(),
    }))
}

/// Delete an assignment
#[utoipa::path(
    delete,
    path = "/assignments/{id}",
    params(
        ("id" = Uuid, Path, description = "Assignment ID")
    ),
    responses(
        (status = 200, description = "Assignment deleted", body = DeleteResponse),
        (status = 404, description = "Assignment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Assignments"
)]
pub async fn delete_assignment(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !AssignmentService::delete_assignment(&state.db, &owner, id).await? {
        return Err(ApiError::not_found("Assignment not found"));
    }

    Ok(Json(DeleteResponse { success: true }))
}
