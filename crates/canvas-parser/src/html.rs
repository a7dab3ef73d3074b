use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref ENTITY: Regex = Regex::new(r"&(?:amp|lt|gt|quot|#39|nbsp);").unwrap();
    static ref FILE_LINK: Regex =
        Regex::new(r#"(?i)\b(?:href|src)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap();
}

/// Marker for files bundled in the export's `viewer/files/` folder
pub const VIEWER_FILES: &str = "viewer/files/";

/// Converts an HTML fragment into plain text
///
/// Removes every tag, decodes `&amp; &lt; &gt; &quot; &#39; &nbsp;` and trims
/// the result. Other entities are left untouched.
///
/// # Arguments
/// * `html` - The HTML fragment to convert
///
/// # Returns
/// The plain text content
pub fn sanitize(html: &str) -> String {
    let text = TAG.replace_all(html, "");
    let text = ENTITY.replace_all(&text, |caps: &Captures| match &caps[0] {
        "&amp;" => "&",
        "&lt;" => "<",
        "&gt;" => ">",
        "&quot;" => "\"",
        "&#39;" => "'",
        _ => " ",
    });

    text.trim().to_string()
}

/// Collects `href`/`src` targets that point into the export's file folder
///
/// # Arguments
/// * `html` - The raw HTML content
///
/// # Returns
/// The link targets in document order, without duplicates
pub fn linked_files(html: &str) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();

    for caps in FILE_LINK.captures_iter(html) {
        let Some(target) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        let target = target.as_str().trim();

        if target.contains(VIEWER_FILES) && !links.iter().any(|l| l == target) {
            links.push(target.to_string());
        }
    }

    links
}
