use crate::dtos::assignment::AssignmentResponse;
use chrono::{DateTime, Utc};
use database::entities::{course, quiz};
use models::course_data::CourseInfo;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: Uuid,
    pub title: String,
    pub course_code: Option<String>,
    pub description: Option<String>,
    pub outline: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<course::Model> for CourseResponse {
    fn from(course: course::Model) -> Self {
        Self {
            id: course.id,
            title: course.title,
            course_code: course.course_code,
            description: course.description,
            outline: course.outline,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub lock_date: Option<DateTime<Utc>>,
    pub unlock_date: Option<DateTime<Utc>>,
    pub points_possible: Option<f64>,
    pub question_count: Option<i32>,
    pub time_limit: Option<i32>,
    pub attempts: Option<i32>,
}

impl From<quiz::Model> for QuizResponse {
    fn from(quiz: quiz::Model) -> Self {
        Self {
            id: quiz.id,
            course_id: quiz.course_id,
            title: quiz.title,
            description: quiz.description,
            due_date: quiz.due_date,
            lock_date: quiz.lock_date,
            unlock_date: quiz.unlock_date,
            points_possible: quiz.points_possible,
            question_count: quiz.question_count,
            time_limit: quiz.time_limit,
            attempts: quiz.attempts,
        }
    }
}

/// A course with its assignments and quizzes
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub assignments: Vec<AssignmentResponse>,
    pub quizzes: Vec<QuizResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub title: Option<String>,
    pub course_code: Option<String>,
    pub description: Option<String>,
}

/// Course metadata as parsed from the export
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseInfoResponse {
    pub name: String,
    pub code: String,
    pub description: String,
}

impl From<CourseInfo> for CourseInfoResponse {
    fn from(info: CourseInfo) -> Self {
        Self {
            name: info.name,
            code: info.code,
            description: info.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub course_id: Uuid,
    pub course: CourseInfoResponse,
    pub assignment_count: usize,
    pub quiz_count: usize,
    pub file_count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn course_model() -> course::Model {
        let now = Utc.with_ymd_and_hms(2026, 1, 25, 16, 27, 50).unwrap();
        course::Model {
            id: Uuid::nil(),
            owner: "dev-user".to_string(),
            title: "CIS 2166".to_string(),
            course_code: Some("CIS 2166".to_string()),
            description: None,
            outline: Some("Week 1: Logic".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_course_response_hides_owner() {
        let value = serde_json::to_value(CourseResponse::from(course_model())).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "title": "CIS 2166",
                "courseCode": "CIS 2166",
                "description": null,
                "outline": "Week 1: Logic",
                "createdAt": "2026-01-25T16:27:50Z",
                "updatedAt": "2026-01-25T16:27:50Z",
            })
        );
    }

    #[test]
    fn test_detail_response_is_flat() {
        let detail = CourseDetailResponse {
            course: CourseResponse::from(course_model()),
            assignments: vec![],
            quizzes: vec![],
        };
        let value = serde_json::to_value(detail).unwrap();

        assert_eq!(value["title"], "CIS 2166");
        assert_eq!(value["assignments"], json!([]));
        assert_eq!(value["quizzes"], json!([]));
    }

    #[test]
    fn test_upload_response() {
        let response = UploadResponse {
            success: true,
            course_id: Uuid::nil(),
            course: CourseInfo::default().into(),
            assignment_count: 2,
            quiz_count: 1,
            file_count: 0,
        };

        assert_eq!(
            serde_json::to_value(response).unwrap(),
            json!({
                "success": true,
                "courseId": "00000000-0000-0000-0000-000000000000",
                "course": {"name": "Untitled Course", "code": "", "description": ""},
                "assignmentCount": 2,
                "quizCount": 1,
                "fileCount": 0,
            })
        );
    }
}
