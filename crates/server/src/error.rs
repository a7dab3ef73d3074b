use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use canvas_parser::ArchiveError;
use log::{error, warn};
use sea_orm::DbErr;
use serde::Serialize;
use utoipa::ToSchema;

pub const INVALID_EXPORT: &str = "Invalid Canvas export: course-data.js not found";

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// A failed request, rendered as `{"error": message}`
#[derive(Debug, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<DbErr> for ApiError {
    fn from(e: DbErr) -> Self {
        error!("Database error: {e}");
        Self::internal("Internal server error")
    }
}

impl From<ArchiveError> for ApiError {
    fn from(e: ArchiveError) -> Self {
        warn!("Rejected upload: {e}");

        match e {
            e if e.is_invalid_export() => Self::bad_request(INVALID_EXPORT),
            e @ ArchiveError::EntryTooLarge { .. } => {
                Self::new(StatusCode::PAYLOAD_TOO_LARGE, e.to_string())
            }
            ArchiveError::Zip(_) | ArchiveError::Io(_) => Self::bad_request("Invalid ZIP archive"),
            _ => Self::bad_request(INVALID_EXPORT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use canvas_parser::MalformedSourceError;

    #[test]
    fn test_archive_errors() {
        assert_eq!(
            ApiError::from(ArchiveError::CourseDataNotFound),
            ApiError::bad_request(INVALID_EXPORT)
        );
        assert_eq!(
            ApiError::from(ArchiveError::NotUtf8),
            ApiError::bad_request(INVALID_EXPORT)
        );
        assert_eq!(
            ApiError::from(ArchiveError::Malformed(MalformedSourceError::MarkerNotFound)),
            ApiError::bad_request(INVALID_EXPORT)
        );
        assert_eq!(
            ApiError::from(ArchiveError::Io(std::io::Error::other("truncated entry"))),
            ApiError::bad_request("Invalid ZIP archive")
        );

        let too_large = ApiError::from(ArchiveError::EntryTooLarge {
            name: "course-data.js".to_string(),
            size: 10,
            max: 4,
        });
        assert_eq!(too_large.status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(too_large.message.contains("course-data.js"));
    }

    #[test]
    fn test_database_errors_are_hidden() {
        let error = ApiError::from(DbErr::Custom("connection refused".to_string()));

        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.message.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_into_response() {
        let response = ApiError::bad_request("No file uploaded").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "No file uploaded" }));
    }
}
