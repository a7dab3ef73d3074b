use crate::{
    auth::CurrentUser,
    dtos::course::{
        CourseDetailResponse, CourseResponse, CreateCourseRequest, DeleteResponse, UploadResponse,
    },
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Path, State, multipart::MultipartError},
};
use canvas_parser::{course_name_from_filename, import_course};
use database::services::course::{CourseService, NewCourse};
use log::{error, info};
use models::course_data::{CourseInfo, UNTITLED_COURSE};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Name of the multipart field carrying the export
const UPLOAD_FIELD: &str = "zipFile";

const ZIP_CONTENT_TYPES: [&str; 3] = [
    "application/zip",
    "application/x-zip-compressed",
    "application/x-zip",
];

/// Multipart body of an export upload
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UploadForm {
    /// Canvas course export archive
    #[schema(value_type = String, format = Binary)]
    zip_file: Vec<u8>,
}

struct ZipUpload {
    file_name: Option<String>,
    data: Bytes,
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Whether an uploaded part looks like a ZIP archive, by content type or name
fn is_zip_upload(file_name: Option<&str>, content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ZIP_CONTENT_TYPES.contains(&ct))
        || file_name.is_some_and(|name| name.to_lowercase().ends_with(".zip"))
}

/// Decides the stored course fields for an import
///
/// The parsed course name wins unless it is the untitled fallback, in which
/// case the name guessed from the upload's file name is used. That guess also
/// fills in a missing course code.
fn new_course_from_import(info: &CourseInfo, outline: &str, file_name: Option<&str>) -> NewCourse {
    let from_file_name = file_name
        .map(course_name_from_filename)
        .filter(|name| !name.is_empty());

    let title = match trimmed(Some(&info.name)) {
        Some(name) if name != UNTITLED_COURSE => name,
        _ => from_file_name
            .clone()
            .unwrap_or_else(|| UNTITLED_COURSE.to_string()),
    };

    NewCourse {
        title,
        course_code: trimmed(Some(&info.code)).or(from_file_name),
        description: trimmed(Some(&info.description)),
        outline: trimmed(Some(outline)),
    }
}

fn new_course_from_request(request: CreateCourseRequest) -> Result<NewCourse, ApiError> {
    let title = trimmed(request.title.as_deref())
        .ok_or_else(|| ApiError::bad_request("Course title is required"))?;

    Ok(NewCourse {
        title,
        course_code: trimmed(request.course_code.as_deref()),
        description: trimmed(request.description.as_deref()),
        outline: None,
    })
}

fn multipart_error(e: MultipartError) -> ApiError {
    ApiError::new(e.status(), e.body_text())
}

/// Reads the `zipFile` part of an upload
async fn read_zip_upload(multipart: &mut Multipart) -> Result<ZipUpload, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        if !is_zip_upload(file_name.as_deref(), field.content_type()) {
            return Err(ApiError::bad_request("Only ZIP files are allowed"));
        }

        let data = field.bytes().await.map_err(multipart_error)?;
        return Ok(ZipUpload { file_name, data });
    }

    Err(ApiError::bad_request("No file uploaded"))
}

/// List the caller's courses
#[utoipa::path(
    get,
    path = "/courses",
    responses(
        (status = 200, description = "Courses of the caller, newest first", body = Vec<CourseResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn list_courses(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = CourseService::list_courses(&state.db, &owner).await?;

    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// Create an empty course
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 200, description = "Course created", body = CourseResponse),
        (status = 400, description = "Missing title", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    Json(request): Json<CreateCourseRequest>,
) -> Result<Json<CourseResponse>, ApiError> {
    let new_course = new_course_from_request(request)?;
    let course = CourseService::create_course(&state.db, &owner, new_course).await?;

    Ok(Json(course.into()))
}

/// Get a course with its assignments and quizzes
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseDetailResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseDetailResponse>, ApiError> {
    let (course, assignments, quizzes) = CourseService::get_course(&state.db, &owner, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    Ok(Json(CourseDetailResponse {
        course: course.into(),
        assignments: assignments.into_iter().map(Into::into).collect(),
        quizzes: quizzes.into_iter().map(Into::into).collect(),
    }))
}

/// Delete a course with everything stored under it
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course deleted", body = DeleteResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !CourseService::delete_course(&state.db, &owner, id).await? {
        return Err(ApiError::not_found("Course not found"));
    }

    Ok(Json(DeleteResponse { success: true }))
}

/// Import a Canvas course export
#[utoipa::path(
    post,
    path = "/courses/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Course imported", body = UploadResponse),
        (status = 400, description = "Not a usable Canvas export", body = ErrorResponse),
        (status = 413, description = "Archive entry too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn upload_course(
    State(state): State<AppState>,
    CurrentUser(owner): CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let upload = read_zip_upload(&mut multipart).await?;
    info!(
        "Importing {} ({} bytes) for {owner}",
        upload.file_name.as_deref().unwrap_or("unnamed upload"),
        upload.data.len()
    );

    let max_entry_size = state.config.max_upload_bytes as u64;
    let data = upload.data;
    let import = tokio::task::spawn_blocking(move || import_course(&data, max_entry_size))
        .await
        .map_err(|e| {
            error!("Import task failed: {e}");
            ApiError::internal("Failed to upload course")
        })??;

    let new_course =
        new_course_from_import(&import.data.course, &import.outline, upload.file_name.as_deref());
    let course_id = CourseService::save_import(
        &state.db,
        &owner,
        new_course,
        &import.data,
        &import.files,
    )
    .await?;

    Ok(Json(UploadResponse {
        success: true,
        course_id,
        assignment_count: import.data.assignments.len(),
        quiz_count: import.data.quizzes.len(),
        file_count: import.files.len(),
        course: import.data.course.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT_NAME: &str = "Sec-004-Spring-2026-CIS-2166-2026-Jan-25_16-27-50-905.zip";

    #[test]
    fn test_is_zip_upload() {
        assert!(is_zip_upload(Some("course.zip"), None));
        assert!(is_zip_upload(Some("COURSE.ZIP"), Some("application/octet-stream")));
        assert!(is_zip_upload(None, Some("application/zip")));
        assert!(is_zip_upload(Some("export"), Some("application/x-zip-compressed")));
        assert!(!is_zip_upload(Some("notes.pdf"), Some("application/pdf")));
        assert!(!is_zip_upload(None, None));
    }

    #[test]
    fn test_untitled_import_uses_file_name() {
        let course = new_course_from_import(&CourseInfo::default(), "", Some(EXPORT_NAME));

        assert_eq!(
            course,
            NewCourse {
                title: "CIS 2166".to_string(),
                course_code: Some("CIS 2166".to_string()),
                description: None,
                outline: None,
            }
        );
    }

    #[test]
    fn test_parsed_name_wins() {
        let info = CourseInfo {
            name: "Mathematical Concepts in Computing".to_string(),
            ..Default::default()
        };
        let course = new_course_from_import(&info, "Week 1: Logic", Some(EXPORT_NAME));

        assert_eq!(course.title, "Mathematical Concepts in Computing");
        assert_eq!(course.course_code.as_deref(), Some("CIS 2166"));
        assert_eq!(course.outline.as_deref(), Some("Week 1: Logic"));
    }

    #[test]
    fn test_import_without_any_name() {
        let course = new_course_from_import(&CourseInfo::default(), "", None);

        assert_eq!(course.title, UNTITLED_COURSE);
        assert_eq!(course.course_code, None);
    }

    #[test]
    fn test_new_course_from_request() {
        let course = new_course_from_request(CreateCourseRequest {
            title: Some("  Biology  ".to_string()),
            course_code: Some("".to_string()),
            description: Some("Cells".to_string()),
        })
        .unwrap();

        assert_eq!(course.title, "Biology");
        assert_eq!(course.course_code, None);
        assert_eq!(course.description.as_deref(), Some("Cells"));

        let error = new_course_from_request(CreateCourseRequest {
            title: Some("   ".to_string()),
            course_code: None,
            description: None,
        })
        .unwrap_err();
        assert_eq!(error, ApiError::bad_request("Course title is required"));
    }
}
