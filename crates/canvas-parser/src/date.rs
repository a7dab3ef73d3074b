use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, TimeZone};
use lazy_static::lazy_static;
use regex::Regex;
use std::str::FromStr;
use strum::{EnumIter, EnumString};

lazy_static! {
    static ref CANVAS_DATE: Regex = Regex::new(
        r"(?i)([a-z]+)\s+(\d{1,2})(?:,?\s+(\d{4}))?\s*(?:(?:by|at)\s+(\d{1,2}):(\d{2})\s*([ap]m))?"
    )
    .unwrap();
}

/// Month names as Canvas writes them, abbreviated or in full
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Month {
    #[strum(serialize = "jan", serialize = "january")]
    January = 1,
    #[strum(serialize = "feb", serialize = "february")]
    February,
    #[strum(serialize = "mar", serialize = "march")]
    March,
    #[strum(serialize = "apr", serialize = "april")]
    April,
    #[strum(serialize = "may")]
    May,
    #[strum(serialize = "jun", serialize = "june")]
    June,
    #[strum(serialize = "jul", serialize = "july")]
    July,
    #[strum(serialize = "aug", serialize = "august")]
    August,
    #[strum(serialize = "sep", serialize = "september")]
    September,
    #[strum(serialize = "oct", serialize = "october")]
    October,
    #[strum(serialize = "nov", serialize = "november")]
    November,
    #[strum(serialize = "dec", serialize = "december")]
    December,
}

impl Month {
    /// Calendar month number, 1 through 12
    pub fn number(self) -> u32 {
        self as u32
    }
}

/// Converts a 12-hour clock reading to a 24-hour hour
fn to_24_hour(hour: u32, meridiem: Option<&str>) -> u32 {
    match meridiem.map(str::to_ascii_lowercase).as_deref() {
        Some("pm") if hour < 12 => hour + 12,
        Some("am") if hour == 12 => 0,
        _ => hour,
    }
}

/// Parses a date as shown in the Canvas web UI
///
/// Handles formats such as:
/// - "Jan 29 by 9:50pm"
/// - "Jan 29 at 9:50pm"
/// - "January 30, 2026 at 5:50 PM"
/// - "Feb 7, 2026"
///
/// A missing year is taken from `reference`, and a missing time means the end
/// of that day (23:59). The result is expressed in the time zone of
/// `reference`.
///
/// # Arguments
/// * `input` - The text to parse
/// * `reference` - The current instant, in the time zone the date is read in
///
/// # Returns
/// `Some(DateTime)` if a known month, a valid day and a valid time are found,
/// `None` otherwise. A time that falls in a daylight saving gap of the zone is
/// read one hour later
pub fn parse_canvas_date<Tz: TimeZone>(
    input: &str,
    reference: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let caps = CANVAS_DATE.captures(input)?;

    let month = Month::from_str(&caps[1]).ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year = match caps.get(3) {
        Some(year) => year.as_str().parse().ok()?,
        None => reference.year(),
    };

    let (hour, minute) = match (caps.get(4), caps.get(5)) {
        (Some(hour), Some(minute)) => (
            to_24_hour(hour.as_str().parse().ok()?, caps.get(6).map(|m| m.as_str())),
            minute.as_str().parse().ok()?,
        ),
        _ => (23, 59),
    };

    let local = NaiveDate::from_ymd_opt(year, month.number(), day)?.and_hms_opt(hour, minute, 0)?;
    let zone = reference.timezone();

    zone.from_local_datetime(&local)
        .earliest()
        // A time skipped by a daylight saving jump moves forward one hour
        .or_else(|| {
            zone.from_local_datetime(&(local + TimeDelta::hours(1)))
                .earliest()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult, NaiveDateTime, Timelike, Utc};
    use strum::IntoEnumIterator;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_month_from_str() {
        assert_eq!(Month::from_str("jan").unwrap(), Month::January);
        assert_eq!(Month::from_str("JANUARY").unwrap(), Month::January);
        assert_eq!(Month::from_str("Sep").unwrap(), Month::September);
        assert_eq!(Month::from_str("May").unwrap(), Month::May);
        assert!(Month::from_str("sept").is_err());
        assert!(Month::from_str("homework").is_err());
    }

    #[test]
    fn test_month_numbers() {
        let numbers: Vec<u32> = Month::iter().map(Month::number).collect();
        assert_eq!(numbers, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_to_24_hour() {
        assert_eq!(to_24_hour(9, Some("pm")), 21);
        assert_eq!(to_24_hour(12, Some("PM")), 12);
        assert_eq!(to_24_hour(12, Some("am")), 0);
        assert_eq!(to_24_hour(9, Some("AM")), 9);
        assert_eq!(to_24_hour(9, None), 9);
    }

    #[test]
    fn test_by_time_without_year() {
        assert_eq!(
            parse_canvas_date("Jan 29 by 9:50pm", &reference()),
            Some(utc(2026, 1, 29, 21, 50))
        );
        assert_eq!(
            parse_canvas_date("Jan 29 at 9:50pm", &reference()),
            Some(utc(2026, 1, 29, 21, 50))
        );
    }

    #[test]
    fn test_full_month_with_year_and_time() {
        assert_eq!(
            parse_canvas_date("January 30, 2026 at 5:50 PM", &reference()),
            Some(utc(2026, 1, 30, 17, 50))
        );
    }

    #[test]
    fn test_end_of_day_default() {
        let date = parse_canvas_date("Feb 7, 2026", &reference()).unwrap();
        assert_eq!(date, utc(2026, 2, 7, 23, 59));
        assert_eq!(date.second(), 0);
    }

    #[test]
    fn test_year_defaults_to_reference() {
        let reference = Utc.with_ymd_and_hms(2031, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(
            parse_canvas_date("Mar 3", &reference),
            Some(utc(2031, 3, 3, 23, 59))
        );
    }

    #[test]
    fn test_midnight_and_noon() {
        assert_eq!(
            parse_canvas_date("Apr 1 by 12:00am", &reference()),
            Some(utc(2026, 4, 1, 0, 0))
        );
        assert_eq!(
            parse_canvas_date("Apr 1 by 12:30pm", &reference()),
            Some(utc(2026, 4, 1, 12, 30))
        );
    }

    #[test]
    fn test_local_time_of_reference() {
        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
        let reference = eastern.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap();

        let date = parse_canvas_date("Jan 29 by 9:50pm", &reference).unwrap();
        assert_eq!(date.hour(), 21);
        assert_eq!(date.with_timezone(&Utc), utc(2026, 1, 30, 2, 50));
    }

    /// UTC-5 until 2026-03-08 02:00 local time, UTC-4 from 03:00
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        fn switch() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2026, 3, 8)
                .unwrap()
                .and_hms_opt(2, 0, 0)
                .unwrap()
        }

        fn standard() -> FixedOffset {
            FixedOffset::west_opt(5 * 3600).unwrap()
        }

        fn daylight() -> FixedOffset {
            FixedOffset::west_opt(4 * 3600).unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            if *local < Self::switch() {
                LocalResult::Single(Self::standard())
            } else if *local < Self::switch() + TimeDelta::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::daylight())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::switch() + TimeDelta::hours(5) {
                Self::standard()
            } else {
                Self::daylight()
            }
        }
    }

    #[test]
    fn test_daylight_saving_gap() {
        let reference = SpringForward.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
        let parse = |input: &str| {
            parse_canvas_date(input, &reference).map(|date| date.with_timezone(&Utc))
        };

        // 2:30am does not exist that night and reads as 3:30am daylight time
        assert_eq!(parse("Mar 8, 2026 at 2:30am"), Some(utc(2026, 3, 8, 7, 30)));
        assert_eq!(parse("Mar 8, 2026 at 1:30am"), Some(utc(2026, 3, 8, 6, 30)));
        assert_eq!(parse("Mar 8 by 11:59pm"), Some(utc(2026, 3, 9, 3, 59)));
        assert_eq!(parse("Feb 30, 2026"), None);
    }

    #[test]
    fn test_unrecognized_input() {
        assert_eq!(parse_canvas_date("", &reference()), None);
        assert_eq!(parse_canvas_date("no date here", &reference()), None);
        assert_eq!(parse_canvas_date("Homework 1", &reference()), None);
        assert_eq!(parse_canvas_date("Sept 3", &reference()), None);
    }

    #[test]
    fn test_invalid_calendar_values() {
        assert_eq!(parse_canvas_date("Feb 30, 2026", &reference()), None);
        assert_eq!(parse_canvas_date("Jan 0", &reference()), None);
        assert_eq!(parse_canvas_date("Jan 5 by 9:75pm", &reference()), None);
    }
}
