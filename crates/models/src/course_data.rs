use serde::{Deserialize, Serialize};

/// Course name used when the export does not carry a title
pub const UNTITLED_COURSE: &str = "Untitled Course";

/// Course metadata extracted from an export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseInfo {
    /// Course title, or [`UNTITLED_COURSE`]
    pub name: String,
    /// Course code (e.g., "CIS 2107"); empty until enriched elsewhere
    pub code: String,
    /// Public description; empty until enriched elsewhere
    pub description: String,
}

impl Default for CourseInfo {
    fn default() -> Self {
        Self {
            name: UNTITLED_COURSE.to_string(),
            code: String::new(),
            description: String::new(),
        }
    }
}

/// An assignment record from `course-data.js`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasAssignment {
    /// Opaque identifier assigned by the exporter (e.g., "g123")
    pub export_id: String,
    pub title: String,
    /// Coarse type tag, "Assignment" unless the export says otherwise
    #[serde(rename = "type")]
    pub kind: String,
    /// Plain text, HTML removed
    pub content: String,
    /// Timestamps are kept exactly as the export wrote them
    pub due_at: Option<String>,
    pub lock_at: Option<String>,
    pub unlock_at: Option<String>,
    pub points_possible: Option<f64>,
    pub submission_types: Option<String>,
    pub graded: Option<bool>,
    /// `viewer/files/...` references found in the original HTML content
    pub linked_files: Vec<String>,
}

/// A quiz record from `course-data.js`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasQuiz {
    pub export_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub due_at: Option<String>,
    pub lock_at: Option<String>,
    pub unlock_at: Option<String>,
    pub points_possible: Option<f64>,
    /// Export id of the assignment that grades this quiz
    pub assignment_export_id: Option<String>,
    pub question_count: Option<u32>,
    /// Time limit in minutes
    pub time_limit: Option<u32>,
    /// Allowed attempts; negative values mean unlimited
    pub attempts: Option<i32>,
    pub graded: Option<bool>,
    pub linked_files: Vec<String>,
}

/// A course module, kept as a grouping of items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasModule {
    pub export_id: String,
    pub title: String,
    pub items: Vec<CanvasModuleItem>,
}

/// An entry in a [`CanvasModule`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasModuleItem {
    pub export_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub indent: Option<u32>,
}

/// A wiki or syllabus page. Content is left as HTML until it is displayed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasPage {
    pub export_id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A node of the exported file tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CanvasFile {
    File {
        name: String,
        #[serde(default)]
        path: Option<String>,
        #[serde(default)]
        size: Option<u64>,
    },
    Folder {
        name: String,
        #[serde(default)]
        path: Option<String>,
        /// `null` or missing means the folder has no children
        #[serde(default)]
        files: Option<Vec<CanvasFile>>,
    },
}

impl CanvasFile {
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Folder { name, .. } => name,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Children of a folder; files and empty folders have none
    pub fn children(&self) -> &[CanvasFile] {
        match self {
            Self::Folder {
                files: Some(files), ..
            } => files,
            _ => &[],
        }
    }
}

/// A leaf of the file tree with its full `/`-joined path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatFile {
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// Everything extracted from a course export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseData {
    pub course: CourseInfo,
    pub assignments: Vec<CanvasAssignment>,
    pub quizzes: Vec<CanvasQuiz>,
    pub modules: Vec<CanvasModule>,
    pub files: Vec<CanvasFile>,
    pub pages: Vec<CanvasPage>,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_course_info_default() {
        let info = CourseInfo::default();
        assert_eq!(info.name, "Untitled Course");
        assert!(info.code.is_empty());
        assert!(info.description.is_empty());
    }

    #[test]
    fn test_assignment_serializes_camel_case() {
        let assignment = CanvasAssignment {
            export_id: "g123".to_string(),
            title: "HW1".to_string(),
            kind: "Assignment".to_string(),
            due_at: Some("2026-01-24T23:59:59-05:00".to_string()),
            points_possible: Some(40.0),
            ..Default::default()
        };

        let value = serde_json::to_value(&assignment).unwrap();
        assert_eq!(value["exportId"], "g123");
        assert_eq!(value["type"], "Assignment");
        assert_eq!(value["dueAt"], "2026-01-24T23:59:59-05:00");
        assert_eq!(value["pointsPossible"], 40.0);
        assert_eq!(value["linkedFiles"], json!([]));
    }

    #[test]
    fn test_canvas_file_from_json() {
        let tree: Vec<CanvasFile> = serde_json::from_value(json!([
            { "type": "folder", "name": "Lectures", "files": [
                { "type": "file", "name": "Lec1.pdf", "size": 1000 }
            ]},
            { "type": "folder", "name": "Empty", "files": null },
            { "type": "folder", "name": "Missing" },
            { "type": "file", "name": "syllabus.pdf", "path": "syllabus.pdf" }
        ]))
        .unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree[0].name(), "Lectures");
        assert_eq!(tree[0].children().len(), 1);
        assert!(tree[0].children()[0].is_file());
        assert!(tree[1].children().is_empty());
        assert!(tree[2].children().is_empty());
        assert!(tree[3].is_file());
        assert!(tree[3].children().is_empty());
    }

    #[test]
    fn test_canvas_file_round_trip_tag() {
        let file = CanvasFile::File {
            name: "a.txt".to_string(),
            path: None,
            size: Some(3),
        };
        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(value["type"], "file");
        assert_eq!(value["name"], "a.txt");
    }

    #[test]
    fn test_flat_file_omits_missing_size() {
        let file = FlatFile {
            name: "a.txt".to_string(),
            path: "docs/a.txt".to_string(),
            size: None,
        };
        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(value, json!({ "name": "a.txt", "path": "docs/a.txt" }));
    }
}
