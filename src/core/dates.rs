//! Local calendar-date helpers and time-ordered record identifiers.
//!
//! Every store keys its records by the local calendar date in `YYYY-MM-DD`
//! form. The comparison against "today" is an explicit function rather than
//! an inline string equality so the date-rollover behavior is testable on
//! its own. Near a timezone change the local date can shift mid-session;
//! that ambiguity is accepted and records simply follow the current local
//! clock.

use chrono::{Local, NaiveDate, SecondsFormat, Utc};

/// The current local calendar date.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Formats a date as the `YYYY-MM-DD` key used by all stored records.
#[must_use]
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Whether a stored `YYYY-MM-DD` date key refers to the given local day.
///
/// An unparseable stored date is treated as a different day, which sends
/// callers down their regeneration path.
#[must_use]
pub fn is_same_local_day(stored: &str, day: NaiveDate) -> bool {
    NaiveDate::parse_from_str(stored, "%Y-%m-%d").is_ok_and(|date| date == day)
}

/// The current instant as an RFC 3339 timestamp, for record bookkeeping.
#[must_use]
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Produces a time-ordered identifier strictly greater than `last`.
///
/// Identifiers are millisecond timestamps rendered as decimal strings, so
/// lexicographic-by-creation ordering matches numeric ordering within a
/// store's lifetime. When two records are created within the same
/// millisecond the previous identifier is bumped by one to keep the
/// sequence strictly increasing.
#[must_use]
pub fn time_ordered_id(last: Option<&str>) -> String {
    let now = Utc::now().timestamp_millis();
    let floor = last
        .and_then(|value| value.parse::<i64>().ok())
        .map_or(i64::MIN, |previous| previous + 1);
    now.max(floor).to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_is_same_local_day() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

        assert!(is_same_local_day("2025-03-14", day));
        assert!(!is_same_local_day("2025-03-13", day));
        assert!(!is_same_local_day("2024-03-14", day));
    }

    #[test]
    fn test_is_same_local_day_rejects_garbage() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

        assert!(!is_same_local_day("", day));
        assert!(!is_same_local_day("not-a-date", day));
        assert!(!is_same_local_day("2025/03/14", day));
    }

    #[test]
    fn test_date_key_round_trips() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let key = date_key(day);

        assert_eq!(key, "2025-12-01");
        assert!(is_same_local_day(&key, day));
    }

    #[test]
    fn test_time_ordered_ids_strictly_increase() {
        let mut last = time_ordered_id(None);
        for _ in 0..100 {
            let next = time_ordered_id(Some(&last));
            assert!(
                next.parse::<i64>().unwrap() > last.parse::<i64>().unwrap(),
                "{next} should be greater than {last}"
            );
            last = next;
        }
    }

    #[test]
    fn test_time_ordered_id_ignores_unparseable_last() {
        let id = time_ordered_id(Some("not-a-number"));
        assert!(id.parse::<i64>().is_ok());
    }
}
