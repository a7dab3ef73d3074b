//! The Canvas assignment list table, as copied from a browser
//!
//! Each assignment starts with its title on a line of its own, followed by a
//! few lines of metadata in no fixed order: the due date, the submission
//! status, the score, and sometimes a "Click to ..." prompt. Section headings
//! ("Assignments", "Quizzes", ...) separate groups of assignments.

use super::{is_table_layout, non_empty_lines};
use crate::date::parse_canvas_date;
use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use log::debug;
use models::assignment::ParsedAssignment;
use regex::Regex;
use std::str::FromStr;
use strum::EnumString;

/// Number of lines after a title that may still describe it
const LOOKAHEAD: usize = 4;

lazy_static! {
    static ref DUE_TOKEN: Regex = Regex::new(
        r"(?i)^(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\s+\d{1,2}\s+by\s+\d{1,2}:\d{2}[ap]m$"
    )
    .unwrap();
    static ref SCORE_TOKEN: Regex = Regex::new(r"^[-\d]+\s*/\s*(\d+)$").unwrap();
    static ref SCORE_PREFIX: Regex = Regex::new(r"^[-\d]+\s*/").unwrap();
    static ref DATED: Regex =
        Regex::new(r"(?i)^(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d").unwrap();
    static ref PROMPT: Regex = Regex::new(r"(?i)^click to").unwrap();
}

/// Headings and status words that are never assignment titles
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
enum Label {
    #[strum(serialize = "In-class Activities")]
    InClassActivities,
    Assignments,
    Quizzes,
    #[strum(serialize = "Grade Smoothing")]
    GradeSmoothing,
    Missing,
    Submitted,
}

/// A single classified line of the table
#[derive(Debug, Clone, PartialEq)]
enum Line<'a> {
    /// The "Name Due Submitted Status Score" header
    Header,
    /// A section heading or status word
    Label,
    /// A due date such as "Jan 29 by 9:50pm"
    Due(&'a str),
    /// A score such as "90 / 100" or "- / 100", holding the points possible
    Score(Option<u32>),
    /// A "Click to ..." prompt
    Prompt,
    /// Anything else. `continues` marks lines that also read as metadata of
    /// the title before them (a date in another format, a partial score)
    Title { text: &'a str, continues: bool },
}

impl Line<'_> {
    /// Whether this line may belong to the title before it
    fn continues(&self) -> bool {
        match self {
            Line::Header => false,
            Line::Label | Line::Due(_) | Line::Score(_) | Line::Prompt => true,
            Line::Title { continues, .. } => *continues,
        }
    }
}

/// Determines which [`Line`] variant a trimmed line fits into
fn classify(line: &str) -> Line<'_> {
    if is_table_layout(line) {
        return Line::Header;
    }

    if Label::from_str(line).is_ok() {
        return Line::Label;
    }

    if DUE_TOKEN.is_match(line) {
        return Line::Due(line);
    }

    if let Some(caps) = SCORE_TOKEN.captures(line) {
        return Line::Score(caps[1].parse().ok());
    }

    if PROMPT.is_match(line) {
        return Line::Prompt;
    }

    Line::Title {
        text: line,
        continues: DATED.is_match(line) || SCORE_PREFIX.is_match(line),
    }
}

/// A title whose following lines are still being read for its metadata
struct Pending<'a> {
    title: &'a str,
    due_date: Option<DateTime<Utc>>,
    points: Option<u32>,
    remaining: usize,
}

impl<'a> Pending<'a> {
    fn new(title: &'a str) -> Self {
        Self {
            title,
            due_date: None,
            points: None,
            remaining: LOOKAHEAD,
        }
    }

    fn absorb<Tz: TimeZone>(&mut self, line: &Line<'_>, reference: &DateTime<Tz>) {
        match line {
            Line::Due(token) => {
                self.due_date = parse_canvas_date(token, reference).map(|d| d.with_timezone(&Utc))
            }
            Line::Score(Some(possible)) => self.points = Some(*possible),
            _ => {}
        }
        self.remaining -= 1;
    }

    fn finish(&self, out: &mut Vec<ParsedAssignment>) {
        if self.title.chars().count() > 1 {
            out.push(ParsedAssignment {
                title: self.title.to_string(),
                due_date: self.due_date,
                points: self.points,
            });
        } else {
            debug!(
                "Skipping table title too short to be an assignment: {:?}",
                self.title
            );
        }
    }
}

/// Advances the scan by one line, pushing finished assignments to `out`
///
/// With nothing pending the scan is seeking a title. Otherwise every pending
/// title is seeking its due date or score: a line that continues is absorbed
/// by each of them, and any other line ends them all. A title line that reads
/// like metadata still opens a record of its own, so lookahead windows may
/// overlap. Older titles always close first, which keeps `out` in line order.
fn step<'a, Tz: TimeZone>(
    pending: &mut Vec<Pending<'a>>,
    line: Line<'a>,
    reference: &DateTime<Tz>,
    out: &mut Vec<ParsedAssignment>,
) {
    let continues = line.continues();

    pending.retain_mut(|record| {
        if continues && record.remaining > 0 {
            record.absorb(&line, reference);
            true
        } else {
            record.finish(out);
            false
        }
    });

    if let Line::Title { text, .. } = line {
        pending.push(Pending::new(text));
    }
}

/// Parses text in the table layout
pub(super) fn parse<Tz: TimeZone>(text: &str, reference: &DateTime<Tz>) -> Vec<ParsedAssignment> {
    let mut assignments = Vec::new();
    let mut pending = Vec::new();

    for line in non_empty_lines(text).map(classify) {
        step(&mut pending, line, reference, &mut assignments);
    }

    for record in &pending {
        record.finish(&mut assignments);
    }

    assignments
}
