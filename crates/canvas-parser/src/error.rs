//! Error types for export parsing

use thiserror::Error;

/// The embedded `course-data.js` object could not be recovered
#[derive(Error, Debug)]
pub enum MalformedSourceError {
    /// No `window.COURSE_DATA = {` assignment in the script
    #[error("marker not found")]
    MarkerNotFound,

    /// The object literal after the marker never closes
    #[error("unterminated course data object")]
    Unterminated,

    /// The captured object is not valid JSON
    #[error("invalid course data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while reading an uploaded export archive
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// IO error while reading an entry
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid ZIP archive format
    #[error("Invalid ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The archive has no `course-data.js` entry
    #[error("course-data.js not found")]
    CourseDataNotFound,

    /// `course-data.js` is not valid UTF-8
    #[error("course-data.js is not valid UTF-8")]
    NotUtf8,

    /// An entry exceeds the configured size limit
    #[error("File '{name}' is too large ({size} bytes, max {max} bytes)")]
    EntryTooLarge {
        /// Path of the entry inside the archive
        name: String,
        /// Uncompressed size in bytes
        size: u64,
        /// Maximum allowed size in bytes
        max: u64,
    },

    /// `course-data.js` was found but could not be parsed
    #[error(transparent)]
    Malformed(#[from] MalformedSourceError),
}

impl ArchiveError {
    /// Whether the failure means the upload is not a usable course export,
    /// as opposed to an unreadable ZIP
    pub fn is_invalid_export(&self) -> bool {
        matches!(
            self,
            Self::CourseDataNotFound | Self::NotUtf8 | Self::Malformed(_)
        )
    }
}
