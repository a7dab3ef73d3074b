//! Parsing of the `course-data.js` script shipped in Canvas course exports
//!
//! The export viewer loads its data from a script of the form
//! `window.COURSE_DATA = { ... };`. The object literal is isolated with a
//! brace-balanced scan and decoded as JSON. Individual fields with an
//! unexpected shape are dropped rather than failing the whole document.

use crate::{
    error::MalformedSourceError,
    html::{linked_files, sanitize},
};
use lazy_static::lazy_static;
use log::{debug, warn};
use models::course_data::{
    CanvasAssignment, CanvasFile, CanvasModule, CanvasModuleItem, CanvasPage, CanvasQuiz,
    CourseData, CourseInfo, UNTITLED_COURSE,
};
use regex::Regex;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

lazy_static! {
    static ref MARKER: Regex = Regex::new(r"window\.COURSE_DATA\s*=\s*\{").unwrap();
}

/// Parses the text of a `course-data.js` file
///
/// # Arguments
/// * `source` - The full script text
///
/// # Returns
/// The normalized [`CourseData`], or a [`MalformedSourceError`] when the
/// `window.COURSE_DATA` object cannot be found or is not valid JSON
pub fn parse_course_data(source: &str) -> Result<CourseData, MalformedSourceError> {
    let object = extract_object(source)?;
    let raw: RawCourseData = serde_json::from_str(object)?;

    Ok(raw.into())
}

/// Locates the object literal assigned to `window.COURSE_DATA`
///
/// Scans from the opening brace to its balanced closing brace, skipping
/// braces inside string literals. Anything after the object, such as a
/// trailing semicolon, is ignored.
fn extract_object(source: &str) -> Result<&str, MalformedSourceError> {
    let marker = MARKER
        .find(source)
        .ok_or(MalformedSourceError::MarkerNotFound)?;
    let start = marker.end() - 1;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in source.as_bytes()[start..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&source[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    Err(MalformedSourceError::Unterminated)
}

/// Deserializes an optional field, treating a value of the wrong type as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Deserializes an optional array, dropping entries that do not fit `T`
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(entries)) => {
            let total = entries.len();
            let kept: Vec<T> = entries
                .into_iter()
                .filter_map(|entry| serde_json::from_value(entry).ok())
                .collect();

            if kept.len() < total {
                debug!("Dropped {} malformed entries", total - kept.len());
            }
            Ok(Some(kept))
        }
        Some(Value::Null) | None => Ok(None),
        Some(other) => {
            warn!("Expected an array in course data, found: {other}");
            Ok(None)
        }
    }
}

/// Export ids are usually strings but some exporters write numbers
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(id)) => id,
        Some(Value::Number(id)) => id.to_string(),
        _ => String::new(),
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCourseData {
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    assignments: Option<Vec<RawAssignment>>,
    #[serde(default, deserialize_with = "lenient_list")]
    quizzes: Option<Vec<RawQuiz>>,
    #[serde(default, deserialize_with = "lenient_list")]
    modules: Option<Vec<RawModule>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pages: Option<Vec<RawPage>>,
    /// Older exports name the page list `wikiPages`
    #[serde(default, deserialize_with = "lenient_list")]
    wiki_pages: Option<Vec<RawPage>>,
    #[serde(default, deserialize_with = "lenient_list")]
    files: Option<Vec<RawFile>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAssignment {
    #[serde(default, deserialize_with = "opaque_id")]
    export_id: String,
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    due_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    lock_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    unlock_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    points_possible: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    submission_types: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    graded: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuiz {
    #[serde(default, deserialize_with = "opaque_id")]
    export_id: String,
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    due_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    lock_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    unlock_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    points_possible: Option<f64>,
    #[serde(default, deserialize_with = "opaque_id")]
    assignment_export_id: String,
    #[serde(default, deserialize_with = "lenient")]
    question_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    time_limit: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    attempts: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    graded: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawModule {
    #[serde(default, deserialize_with = "opaque_id")]
    export_id: String,
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    items: Option<Vec<RawModuleItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawModuleItem {
    #[serde(default, deserialize_with = "opaque_id")]
    export_id: String,
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    indent: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage {
    #[serde(default, deserialize_with = "opaque_id")]
    export_id: String,
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    content: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    kind: Option<String>,
}

/// A node of the file tree. Children are decoded one by one so a bad node
/// only loses itself
#[derive(Debug, Deserialize)]
struct RawFile {
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    path: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    size: Option<u64>,
    #[serde(default, deserialize_with = "lenient_list")]
    files: Option<Vec<RawFile>>,
}

impl RawFile {
    /// Converts the node, or `None` when it has no name or an unknown type
    fn into_node(self) -> Option<CanvasFile> {
        let Some(name) = self.name else {
            debug!("Dropped file tree node without a name");
            return None;
        };

        match self.kind.as_deref() {
            Some("file") => Some(CanvasFile::File {
                name,
                path: self.path,
                size: self.size,
            }),
            Some("folder") => Some(CanvasFile::Folder {
                name,
                path: self.path,
                files: self.files.map(into_nodes),
            }),
            other => {
                debug!("Dropped file tree node {name:?} of type {other:?}");
                None
            }
        }
    }
}

fn into_nodes(raw: Vec<RawFile>) -> Vec<CanvasFile> {
    raw.into_iter().filter_map(RawFile::into_node).collect()
}

impl From<RawCourseData> for CourseData {
    fn from(raw: RawCourseData) -> Self {
        Self {
            course: CourseInfo {
                name: raw.title.unwrap_or_else(|| UNTITLED_COURSE.to_string()),
                ..Default::default()
            },
            assignments: map_all(raw.assignments),
            quizzes: map_all(raw.quizzes),
            modules: map_all(raw.modules),
            pages: map_all(raw.pages.or(raw.wiki_pages)),
            files: into_nodes(raw.files.unwrap_or_default()),
        }
    }
}

/// Maps a list that defaults to empty when the source key is absent
fn map_all<R, T: From<R>>(raw: Option<Vec<R>>) -> Vec<T> {
    raw.unwrap_or_default().into_iter().map(T::from).collect()
}

impl From<RawAssignment> for CanvasAssignment {
    fn from(raw: RawAssignment) -> Self {
        let html = raw.content.unwrap_or_default();

        Self {
            export_id: raw.export_id,
            title: raw.title.unwrap_or_default(),
            kind: raw.kind.unwrap_or_else(|| "Assignment".to_string()),
            content: sanitize(&html),
            due_at: raw.due_at,
            lock_at: raw.lock_at,
            unlock_at: raw.unlock_at,
            points_possible: raw.points_possible,
            submission_types: raw.submission_types,
            graded: raw.graded,
            linked_files: linked_files(&html),
        }
    }
}

impl From<RawQuiz> for CanvasQuiz {
    fn from(raw: RawQuiz) -> Self {
        let html = raw.content.unwrap_or_default();

        Self {
            export_id: raw.export_id,
            title: raw.title.unwrap_or_default(),
            kind: raw.kind.unwrap_or_else(|| "Quiz".to_string()),
            content: sanitize(&html),
            due_at: raw.due_at,
            lock_at: raw.lock_at,
            unlock_at: raw.unlock_at,
            points_possible: raw.points_possible,
            assignment_export_id: (!raw.assignment_export_id.is_empty())
                .then_some(raw.assignment_export_id),
            question_count: raw.question_count,
            time_limit: raw.time_limit,
            attempts: raw.attempts,
            graded: raw.graded,
            linked_files: linked_files(&html),
        }
    }
}

impl From<RawModule> for CanvasModule {
    fn from(raw: RawModule) -> Self {
        Self {
            export_id: raw.export_id,
            title: raw.title.unwrap_or_default(),
            items: map_all(raw.items),
        }
    }
}

impl From<RawModuleItem> for CanvasModuleItem {
    fn from(raw: RawModuleItem) -> Self {
        Self {
            export_id: raw.export_id,
            title: raw.title.unwrap_or_default(),
            kind: raw.kind.unwrap_or_default(),
            indent: raw.indent,
        }
    }
}

impl From<RawPage> for CanvasPage {
    fn from(raw: RawPage) -> Self {
        Self {
            export_id: raw.export_id,
            title: raw.title.unwrap_or_default(),
            content: raw.content.unwrap_or_default(),
            kind: raw.kind.unwrap_or_else(|| "Page".to_string()),
        }
    }
}
