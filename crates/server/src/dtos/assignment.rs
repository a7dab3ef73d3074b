use chrono::{DateTime, Utc};
use database::entities::assignment;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub lock_date: Option<DateTime<Utc>>,
    pub unlock_date: Option<DateTime<Utc>>,
    pub points_possible: Option<f64>,
    pub submission_type: Option<String>,
    pub is_graded: bool,
    pub created_at: DateTime<Utc>,
}

impl From<assignment::Model> for AssignmentResponse {
    fn from(assignment: assignment::Model) -> Self {
        Self {
            id: assignment.id,
            course_id: assignment.course_id,
            title: assignment.title,
            description: assignment.description,
            due_date: assignment.due_date,
            lock_date: assignment.lock_date,
            unlock_date: assignment.unlock_date,
            points_possible: assignment.points_possible,
            submission_type: assignment.submission_type,
            is_graded: assignment.is_graded,
            created_at: assignment.created_at,
        }
    }
}

/// Text pasted from the Canvas assignment list
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParseAssignmentsRequest {
    pub course_id: Option<Uuid>,
    pub text: Option<String>,
}

impl ParseAssignmentsRequest {
    /// Returns the course id and the trimmed text if both are present
    pub fn validate(&self) -> Option<(Uuid, &str)> {
        let text = self.text.as_deref()?.trim();
        match self.course_id {
            Some(course_id) if !text.is_empty() => Some((course_id, text)),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParseAssignmentsResponse {
    pub count: usize,
    pub assignments: Vec<AssignmentResponse>,
}
