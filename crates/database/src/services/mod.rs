pub mod assignment;
pub mod course;

use chrono::{DateTime, Utc};
use log::debug;

/// Reads a timestamp string from an export as RFC 3339
///
/// Values that do not parse are dropped rather than failing the import.
pub(crate) fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value?.trim();

    match DateTime::parse_from_rfc3339(value) {
        Ok(timestamp) => Some(timestamp.with_timezone(&Utc)),
        Err(e) => {
            debug!("Dropping unparseable timestamp {value:?}: {e}");
            None
        }
    }
}

/// Stores empty text as NULL
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(
            parse_timestamp(Some("2026-01-29T21:50:00Z")),
            Utc.with_ymd_and_hms(2026, 1, 29, 21, 50, 0).single()
        );
        assert_eq!(
            parse_timestamp(Some("2026-01-29T16:50:00-05:00")),
            Utc.with_ymd_and_hms(2026, 1, 29, 21, 50, 0).single()
        );
        assert_eq!(parse_timestamp(Some("next tuesday")), None);
        assert_eq!(parse_timestamp(Some("")), None);
        assert_eq!(parse_timestamp(None), None);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  Read  "), Some("Read".to_string()));
        assert_eq!(non_empty("   "), None);
    }
}
