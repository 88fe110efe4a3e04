//! Daily prayer status tracker.
//!
//! Maintains today's five-prayer checklist: loads the stored set on startup
//! (regenerating it when the calendar date rolled over), applies status
//! updates write-through, and exposes the completed-count aggregate shown
//! on the home screen. Only today's records are kept; past days are
//! discarded on regeneration.

use crate::{
    core::{dates, documents},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Storage key for the daily prayer document
pub const PRAYERS_KEY: &str = "prayers";

/// Fixed placeholder schedule, one `HH:MM` entry per prayer in canonical order
const SCHEDULED_TIMES: [&str; 5] = ["05:30", "12:30", "15:45", "18:15", "19:45"];

/// The five daily prayers in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerName {
    /// Dawn prayer
    Fajr,
    /// Midday prayer
    Dhuhr,
    /// Afternoon prayer
    Asr,
    /// Sunset prayer
    Maghrib,
    /// Night prayer
    Isha,
}

impl PrayerName {
    /// All five prayers in canonical order
    pub const ALL: [Self; 5] = [Self::Fajr, Self::Dhuhr, Self::Asr, Self::Maghrib, Self::Isha];

    /// Stable lowercase identifier used in record ids and notification settings
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Fajr => "fajr",
            Self::Dhuhr => "dhuhr",
            Self::Asr => "asr",
            Self::Maghrib => "maghrib",
            Self::Isha => "isha",
        }
    }

    /// English display name
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Fajr => "Fajr",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
        }
    }

    /// Arabic name
    #[must_use]
    pub fn arabic(self) -> &'static str {
        match self {
            Self::Fajr => "الفجر",
            Self::Dhuhr => "الظهر",
            Self::Asr => "العصر",
            Self::Maghrib => "المغرب",
            Self::Isha => "العشاء",
        }
    }
}

/// Completion status of a single prayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrayerStatus {
    /// Not yet marked by the user
    Pending,
    /// Prayed within its window
    OnTime,
    /// Prayed after its window
    Late,
    /// Not prayed
    Missed,
}

impl PrayerStatus {
    /// Whether this status counts toward the completed aggregate
    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, Self::OnTime | Self::Late)
    }
}

/// One prayer entry in today's checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerRecord {
    /// Unique per-day identifier, `"<date>-<prayer id>"`
    pub id: String,
    /// Canonical prayer name
    pub name: PrayerName,
    /// Arabic display name
    pub name_arabic: String,
    /// Scheduled time as `HH:MM`
    pub scheduled_time: String,
    /// Current completion status
    pub status: PrayerStatus,
}

/// The persisted document: today's date key plus the five records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct DailyPrayers {
    date: String,
    prayers: Vec<PrayerRecord>,
}

fn generate_daily_prayers(day: NaiveDate) -> DailyPrayers {
    let date = dates::date_key(day);
    let prayers = PrayerName::ALL
        .into_iter()
        .zip(SCHEDULED_TIMES)
        .map(|(name, time)| PrayerRecord {
            id: format!("{date}-{}", name.id()),
            name,
            name_arabic: name.arabic().to_string(),
            scheduled_time: time.to_string(),
            status: PrayerStatus::Pending,
        })
        .collect();

    DailyPrayers { date, prayers }
}

/// Today's five-prayer checklist with write-through persistence.
///
/// The in-memory records are the source of truth for all reads; every
/// mutation is written through to storage immediately. A failed write
/// surfaces as an `Err` while the in-memory update stands for the rest of
/// the session.
pub struct PrayerTracker {
    db: DatabaseConnection,
    date: String,
    prayers: Vec<PrayerRecord>,
}

impl PrayerTracker {
    /// Loads today's records from storage, regenerating a fresh pending set
    /// when the stored date is not today, the document is missing, or the
    /// document cannot be read.
    pub async fn load(db: DatabaseConnection) -> Result<Self> {
        Self::load_for_date(db, dates::today()).await
    }

    /// Same as [`Self::load`] with an explicit "today", for date-rollover tests.
    pub async fn load_for_date(db: DatabaseConnection, day: NaiveDate) -> Result<Self> {
        let stored: Option<DailyPrayers> = match documents::load(&db, PRAYERS_KEY).await {
            Ok(value) => value,
            Err(error) => {
                warn!(%error, "stored prayer document unreadable, regenerating today's set");
                None
            }
        };

        let daily = match stored {
            Some(daily) if dates::is_same_local_day(&daily.date, day) => daily,
            _ => generate_daily_prayers(day),
        };

        Ok(Self {
            db,
            date: daily.date,
            prayers: daily.prayers,
        })
    }

    /// The date key this checklist belongs to.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Today's records in canonical order.
    #[must_use]
    pub fn prayers(&self) -> &[PrayerRecord] {
        &self.prayers
    }

    /// Sets the status of the record with the given id and persists the
    /// full set.
    ///
    /// An unknown id is a no-op. On a persistence failure the in-memory
    /// record keeps the new status and the error is returned for the
    /// caller to report or ignore.
    pub async fn update_status(&mut self, prayer_id: &str, status: PrayerStatus) -> Result<()> {
        let Some(record) = self.prayers.iter_mut().find(|p| p.id == prayer_id) else {
            return Ok(());
        };
        record.status = status;

        self.persist().await
    }

    /// Count of prayers marked on-time or late today, in 0..=5.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.prayers
            .iter()
            .filter(|p| p.status.is_completed())
            .count()
    }

    /// The streak figure shown on the home screen.
    ///
    /// History is not retained beyond today, so the streak is defined as
    /// today's completed count.
    #[must_use]
    pub fn streak(&self) -> usize {
        self.completed_count()
    }

    async fn persist(&self) -> Result<()> {
        let document = DailyPrayers {
            date: self.date.clone(),
            prayers: self.prayers.clone(),
        };
        documents::save(&self.db, PRAYERS_KEY, &document).await
    }
}
