//! Recovery of assignments from text copied out of the Canvas web UI
//!
//! Two layouts are recognized. The assignment list table, where each
//! assignment spans several lines (title, due date, status, score), and free
//! text with one assignment per line.

mod plain;
mod table;

use chrono::{DateTime, Local, TimeZone};
use models::assignment::ParsedAssignment;

/// Splits text into trimmed, non-empty lines
fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Whether the text contains the header of the Canvas assignment table
fn is_table_layout(text: &str) -> bool {
    text.contains("Name") && text.contains("Due") && text.contains("Status")
}

/// Parses pasted assignment text, reading dates in the local time zone
///
/// See [`parse_assignment_text_at`].
pub fn parse_assignment_text(text: &str) -> Vec<ParsedAssignment> {
    parse_assignment_text_at(text, &Local::now())
}

/// Parses pasted assignment text
///
/// Lines that cannot be interpreted are dropped. Text that contains no
/// assignment at all yields an empty list.
///
/// # Arguments
/// * `text` - The pasted text
/// * `reference` - The current instant, supplying the default year and the
///   time zone dates are read in
///
/// # Returns
/// The assignments in the order they appear
pub fn parse_assignment_text_at<Tz: TimeZone>(
    text: &str,
    reference: &DateTime<Tz>,
) -> Vec<ParsedAssignment> {
    let text = text.trim();

    if is_table_layout(text) {
        table::parse(text, reference)
    } else {
        plain::parse(text, reference)
    }
}
