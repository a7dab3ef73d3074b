//! Reading uploaded Canvas export archives

use crate::course_data::parse_course_data;
use crate::error::ArchiveError;
use crate::html::VIEWER_FILES;
use crate::outline::extract_outline;
use log::{debug, info, warn};
use models::course_data::CourseData;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Base name of the entry holding the embedded course data
pub const COURSE_DATA_FILE: &str = "course-data.js";

/// Default per-entry size limit (100 MiB)
pub const DEFAULT_MAX_ENTRY_SIZE: u64 = 100 * 1024 * 1024;

/// A course file found under `viewer/files/` in the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFile {
    /// Base name of the entry
    pub name: String,
    /// Full path of the entry inside the archive
    pub path: String,
    /// Uncompressed size in bytes
    pub size: u64,
    /// Text after the last `.` of the name, or `"unknown"`
    pub extension: String,
    pub data: Vec<u8>,
}

/// Everything extracted from one export
#[derive(Debug, Clone)]
pub struct CourseImport {
    pub data: CourseData,
    pub outline: String,
    pub files: Vec<ArchiveFile>,
}

/// Returns the part of an entry path after the last `/`
fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn extension(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_string(),
        _ => "unknown".to_string(),
    }
}

/// Whether an entry path is an attachment rather than part of the viewer
fn is_course_file(path: &str) -> bool {
    path.contains(VIEWER_FILES) && !path.ends_with(".js") && !path.ends_with(".html")
}

fn read_entry(entry: &mut impl Read, size: u64) -> Result<Vec<u8>, ArchiveError> {
    let mut data = Vec::with_capacity(usize::try_from(size).unwrap_or_default());
    entry.read_to_end(&mut data)?;
    Ok(data)
}

/// An export archive opened from memory
pub struct CourseArchive<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
    max_entry_size: u64,
}

impl<'a> CourseArchive<'a> {
    /// Opens an archive with the default entry size limit
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, ArchiveError> {
        Ok(Self {
            archive: ZipArchive::new(Cursor::new(bytes))?,
            max_entry_size: DEFAULT_MAX_ENTRY_SIZE,
        })
    }

    /// Sets the largest uncompressed entry that will be read
    pub fn with_max_entry_size(mut self, max_entry_size: u64) -> Self {
        self.max_entry_size = max_entry_size;
        self
    }

    /// Number of entries, directories included
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }

    /// Reads the text of the first `course-data.js` entry, wherever it is
    /// placed in the archive
    pub fn course_data_text(&mut self) -> Result<String, ArchiveError> {
        for i in 0..self.archive.len() {
            let mut entry = self.archive.by_index(i)?;

            if entry.is_dir() || base_name(entry.name()) != COURSE_DATA_FILE {
                continue;
            }

            let size = entry.size();
            if size > self.max_entry_size {
                return Err(ArchiveError::EntryTooLarge {
                    name: entry.name().to_string(),
                    size,
                    max: self.max_entry_size,
                });
            }

            debug!("Reading course data from {}", entry.name());
            let data = read_entry(&mut entry, size)?;
            return String::from_utf8(data).map_err(|_| ArchiveError::NotUtf8);
        }

        Err(ArchiveError::CourseDataNotFound)
    }

    /// Reads every attachment under `viewer/files/`, skipping the viewer's own
    /// scripts and pages
    pub fn course_files(&mut self) -> Result<Vec<ArchiveFile>, ArchiveError> {
        let mut files = Vec::new();

        for i in 0..self.archive.len() {
            let mut entry = self.archive.by_index(i)?;

            if entry.is_dir() || !is_course_file(entry.name()) {
                continue;
            }

            let path = entry.name().to_string();
            let size = entry.size();

            if size > self.max_entry_size {
                warn!(
                    "Skipping large file: {path} ({size} bytes exceeds {} bytes limit)",
                    self.max_entry_size
                );
                continue;
            }

            let name = base_name(&path).to_string();
            let data = read_entry(&mut entry, size)?;

            files.push(ArchiveFile {
                extension: extension(&name),
                name,
                path,
                size,
                data,
            });
        }

        Ok(files)
    }
}

/// Runs the whole export pipeline on an uploaded archive
///
/// # Arguments
/// * `bytes` - The uploaded ZIP
/// * `max_entry_size` - Largest uncompressed entry that will be read
///
/// # Returns
/// The parsed course data, its outline and its attachments
pub fn import_course(bytes: &[u8], max_entry_size: u64) -> Result<CourseImport, ArchiveError> {
    let mut archive = CourseArchive::from_bytes(bytes)?.with_max_entry_size(max_entry_size);

    let text = archive.course_data_text()?;
    let data = parse_course_data(&text)?;
    let outline = extract_outline(&data.pages);
    let files = archive.course_files()?;

    info!(
        "Imported \"{}\": {} assignments, {} quizzes, {} pages, {} files",
        data.course.name,
        data.assignments.len(),
        data.quizzes.len(),
        data.pages.len(),
        files.len()
    );

    Ok(CourseImport {
        data,
        outline,
        files,
    })
}
