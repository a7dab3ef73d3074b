//! Free text with one assignment per line, such as
//! "Homework 1 due Jan 29 at 9:50pm - 100 pts"

use super::non_empty_lines;
use crate::date::parse_canvas_date;
use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use log::debug;
use models::assignment::ParsedAssignment;
use regex::Regex;

lazy_static! {
    static ref NOISE: Regex = Regex::new(r"(?i)^(due|points?|pts)$").unwrap();
    static ref POINTS: Regex = Regex::new(r"(?i)(\d+)\s*(pts?|points?)").unwrap();
    /// Tried in order, the first match wins
    static ref DUE_PATTERNS: [Regex; 4] = [
        Regex::new(r"(?i)due\s+([a-z]+\s+\d{1,2}(?:,?\s+\d{4})?)\s+at\s+(\d{1,2}:\d{2}\s*[ap]m)")
            .unwrap(),
        Regex::new(r"(?i)due:?\s+([a-z]+\s+\d{1,2},?\s+\d{4})\s+at\s+(\d{1,2}:\d{2}\s*[ap]m)")
            .unwrap(),
        Regex::new(r"(?i)due:?\s+([a-z]+\s+\d{1,2},?\s+\d{4})").unwrap(),
        Regex::new(r"(?i)\|\s*due:?\s+([a-z]+\s+\d{1,2},?\s+\d{4})").unwrap(),
    ];
    static ref SEPARATORS: Regex = Regex::new(r"\s*[-|]\s*").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Finds the due date in a line
///
/// # Returns
/// The text that matched, to be removed from the title, and the parsed date
/// if the matched text is a valid date
fn find_due_date<'a, Tz: TimeZone>(
    line: &'a str,
    reference: &DateTime<Tz>,
) -> Option<(&'a str, Option<DateTime<Utc>>)> {
    DUE_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.captures(line)?;
        let date = match caps.get(2) {
            Some(time) => format!("{} at {}", &caps[1], time.as_str()),
            None => caps[1].to_string(),
        };
        let due_date = parse_canvas_date(&date, reference).map(|d| d.with_timezone(&Utc));

        Some((caps.get(0)?.as_str(), due_date))
    })
}

/// Parses a single line into an assignment
///
/// # Returns
/// `None` if nothing usable is left for a title once the points and due
/// date are removed
fn parse_line<Tz: TimeZone>(line: &str, reference: &DateTime<Tz>) -> Option<ParsedAssignment> {
    let mut title = line.to_string();
    let mut points = None;
    let mut due_date = None;

    if let Some(caps) = POINTS.captures(line) {
        points = caps[1].parse().ok();
        title = title.replacen(&caps[0], "", 1).trim().to_string();
    }

    if let Some((matched, date)) = find_due_date(line, reference) {
        due_date = date;
        title = title.replacen(matched, "", 1).trim().to_string();
    }

    let title = SEPARATORS.replace_all(&title, " ");
    let title = WHITESPACE.replace_all(&title, " ").trim().to_string();

    if title.chars().count() < 2 {
        debug!("Skipping line without a title: {line:?}");
        return None;
    }

    Some(ParsedAssignment {
        title,
        due_date,
        points,
    })
}

/// Parses text with one assignment per line
pub(super) fn parse<Tz: TimeZone>(text: &str, reference: &DateTime<Tz>) -> Vec<ParsedAssignment> {
    non_empty_lines(text)
        .filter(|line| line.chars().count() >= 5 && !NOISE.is_match(line))
        .filter_map(|line| parse_line(line, reference))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> Option<DateTime<Utc>> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).single()
    }

    #[test]
    fn test_due_at_time_with_points() {
        let parsed = parse("Homework 1 due Jan 29 at 9:50pm - 100 pts", &reference());

        assert_eq!(
            parsed,
            vec![ParsedAssignment {
                title: "Homework 1".to_string(),
                due_date: utc(2026, 1, 29, 21, 50),
                points: Some(100),
            }]
        );
    }

    #[test]
    fn test_due_colon_with_year_and_time() {
        let parsed = parse(
            "Project Proposal - 68pts - due: January 30, 2026 at 5:50 PM",
            &reference(),
        );

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "Project Proposal");
        assert_eq!(parsed[0].points, Some(68));
        assert_eq!(parsed[0].due_date, utc(2026, 1, 30, 17, 50));
    }

    #[test]
    fn test_due_date_without_time() {
        let parsed = parse("Lab Report 2 | due: Feb 7, 2026 | 50 points", &reference());

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "Lab Report 2");
        assert_eq!(parsed[0].points, Some(50));
        assert_eq!(parsed[0].due_date, utc(2026, 2, 7, 23, 59));
    }

    #[test]
    fn test_title_only() {
        let parsed = parse("Reading chapter four", &reference());

        assert_eq!(parsed, vec![ParsedAssignment::new("Reading chapter four")]);
    }

    #[test]
    fn test_unknown_month_is_still_removed() {
        let parsed = parse("Essay due Smarch 3 at 5:00pm", &reference());

        assert_eq!(parsed, vec![ParsedAssignment::new("Essay")]);
    }

    #[test]
    fn test_noise_and_short_lines() {
        let parsed = parse(
            "due\nPoints\npts\nHW 1\n\nQuiz review session\n   ",
            &reference(),
        );

        assert_eq!(parsed, vec![ParsedAssignment::new("Quiz review session")]);
    }

    #[test]
    fn test_line_without_title() {
        assert!(parse("100 pts", &reference()).is_empty());
        assert!(parse("due Jan 29 at 9:50pm - 10 pts", &reference()).is_empty());
    }

    #[test]
    fn test_separators_are_collapsed() {
        let parsed = parse("Pre-lab  |  Week 3 -- Circuits", &reference());

        assert_eq!(parsed[0].title, "Pre lab Week 3 Circuits");
    }

    #[test]
    fn test_multiple_lines() {
        let parsed = parse(
            "Homework 1 due Jan 29 at 9:50pm - 100 pts\n\nHomework 2 due Feb 5 at 11:59pm - 100 pts\n",
            &reference(),
        );

        let titles: Vec<&str> = parsed.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Homework 1", "Homework 2"]);
        assert_eq!(parsed[1].due_date, utc(2026, 2, 5, 23, 59));
    }
}
