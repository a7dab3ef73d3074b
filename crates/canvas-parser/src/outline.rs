use crate::html::sanitize;
use models::course_data::CanvasPage;

/// Title keywords that mark a page as the course outline
const OUTLINE_KEYWORDS: [&str; 3] = ["syllabus", "outline", "schedule"];

/// Picks the course outline from the exported pages
///
/// The first page whose title contains "syllabus", "outline" or "schedule"
/// (any case) wins. A course with a single page uses that page even without
/// a keyword. Otherwise there is no outline.
///
/// # Arguments
/// * `pages` - The pages in export order
///
/// # Returns
/// The sanitized page content, or an empty string
pub fn extract_outline(pages: &[CanvasPage]) -> String {
    let outline = pages
        .iter()
        .find(|page| {
            let title = page.title.to_lowercase();
            OUTLINE_KEYWORDS.iter().any(|keyword| title.contains(keyword))
        })
        .or(match pages {
            [only] => Some(only),
            _ => None,
        });

    outline
        .map(|page| sanitize(&page.content))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str, content: &str) -> CanvasPage {
        CanvasPage {
            export_id: "g1".to_string(),
            title: title.to_string(),
            content: content.to_string(),
            kind: "WikiPage".to_string(),
        }
    }

    #[test]
    fn test_extract_syllabus_page() {
        let pages = vec![
            page("Other Page", "Other content"),
            page("Course Syllabus", "<p>This is the course syllabus</p>"),
        ];

        assert_eq!(extract_outline(&pages), "This is the course syllabus");
    }

    #[test]
    fn test_keyword_any_case() {
        let pages = vec![
            page("Welcome", "hello"),
            page("WEEKLY SCHEDULE", "Week 1: intro"),
            page("Outline", "later"),
        ];

        assert_eq!(extract_outline(&pages), "Week 1: intro");
    }

    #[test]
    fn test_single_page_fallback() {
        let pages = vec![page("Welcome", "Welcome to the course")];
        assert_eq!(extract_outline(&pages), "Welcome to the course");
    }

    #[test]
    fn test_no_match_among_many() {
        let pages = vec![page("Welcome", "hello"), page("Office Hours", "Mondays")];
        assert_eq!(extract_outline(&pages), "");
    }

    #[test]
    fn test_empty_pages() {
        assert_eq!(extract_outline(&[]), "");
    }
}
