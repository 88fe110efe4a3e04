//! Derived views over the daily prayer schedule.
//!
//! The tracker's records carry fixed `HH:MM` placeholder times; these pure
//! functions classify records against a local clock time so the home screen
//! can highlight the upcoming prayer and show a countdown. No I/O.

use crate::core::prayers::PrayerRecord;
use chrono::NaiveTime;

/// Parses a record's `HH:MM` scheduled time.
#[must_use]
pub fn parse_scheduled_time(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M").ok()
}

/// Whether the record's scheduled time has already passed at `now`.
///
/// A record whose time cannot be parsed is treated as not past.
#[must_use]
pub fn is_past(record: &PrayerRecord, now: NaiveTime) -> bool {
    parse_scheduled_time(&record.scheduled_time).is_some_and(|time| now > time)
}

/// The first record whose scheduled time has not passed, i.e. the prayer
/// to highlight next. `None` once the day's last prayer is behind `now`.
#[must_use]
pub fn next_prayer<'a>(prayers: &'a [PrayerRecord], now: NaiveTime) -> Option<&'a PrayerRecord> {
    prayers.iter().find(|record| !is_past(record, now))
}

/// Whole minutes from `now` until the next prayer, if there is one left
/// today.
#[must_use]
pub fn minutes_until_next(prayers: &[PrayerRecord], now: NaiveTime) -> Option<i64> {
    let record = next_prayer(prayers, now)?;
    let time = parse_scheduled_time(&record.scheduled_time)?;
    Some((time - now).num_minutes())
}
