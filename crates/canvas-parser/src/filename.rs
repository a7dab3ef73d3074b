use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref COURSE_CODE: Regex = Regex::new(r"([A-Z]{2,})[\s-]?(\d{3,4})").unwrap();
    static ref EXPORT_TIMESTAMP: Regex = Regex::new(r"\d{4}-\w{3}-\d{2}.*$").unwrap();
    static ref SEPARATORS: Regex = Regex::new(r"[-_]").unwrap();
}

/// Guesses a course name from the file name of an uploaded export
///
/// Canvas names exports after the course section and the export time, e.g.
/// `Sec-004-Spring-2026-CIS-2166-2026-Jan-25_16-27-50-905.zip`. A department
/// code followed by a course number is preferred (`"CIS 2166"`); otherwise the
/// name without its timestamp is used.
pub fn course_name_from_filename(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".zip").unwrap_or(file_name);

    if let Some(caps) = COURSE_CODE.captures(stem) {
        return format!("{} {}", &caps[1], &caps[2]);
    }

    let stem = EXPORT_TIMESTAMP.replace(stem, "");
    SEPARATORS.replace_all(&stem, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_code() {
        assert_eq!(
            course_name_from_filename("Sec-004-Spring-2026-CIS-2166-2026-Jan-25_16-27-50-905.zip"),
            "CIS 2166"
        );
        assert_eq!(course_name_from_filename("CIS 2166.zip"), "CIS 2166");
        assert_eq!(course_name_from_filename("MATH1041-export.zip"), "MATH 1041");
    }

    #[test]
    fn test_lowercase_code_is_not_a_course_code() {
        assert_eq!(course_name_from_filename("cis-2166.zip"), "cis 2166");
    }

    #[test]
    fn test_without_course_code() {
        assert_eq!(
            course_name_from_filename("intro_to_writing-2026-Jan-25_16-27-50-905.zip"),
            "intro to writing"
        );
        assert_eq!(course_name_from_filename("Biology.zip"), "Biology");
        assert_eq!(course_name_from_filename("notes"), "notes");
    }

    #[test]
    fn test_timestamp_only() {
        assert_eq!(course_name_from_filename("2026-Jan-25_16-27-50.zip"), "");
    }
}
