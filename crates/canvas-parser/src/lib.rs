pub mod archive;
pub mod course_data;
pub mod date;
pub mod error;
pub mod files;
pub mod filename;
pub mod html;
pub mod outline;
pub mod text;

pub use archive::{ArchiveFile, CourseArchive, CourseImport, import_course};
pub use course_data::parse_course_data;
pub use date::parse_canvas_date;
pub use error::{ArchiveError, MalformedSourceError};
pub use files::flatten_files;
pub use filename::course_name_from_filename;
pub use html::sanitize;
pub use outline::extract_outline;
pub use text::{parse_assignment_text, parse_assignment_text_at};
