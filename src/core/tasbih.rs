//! Tasbih counting state machine and session recorder.
//!
//! Tracks an in-progress dhikr count against the selected preset's target
//! and appends an immutable session record at each natural boundary:
//! reaching the target, switching presets mid-count, or an explicit reset
//! mid-count. Resetting at zero or at a completed target records nothing,
//! so the history never contains empty or duplicate sessions.

use crate::{
    config::presets::DhikrPreset,
    core::{dates, documents},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Storage key for the session history document
pub const TASBIH_KEY: &str = "tasbih";

/// One finished or abandoned counting session. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasbihSession {
    /// Time-ordered identifier
    pub id: String,
    /// Identifier of the preset that was being counted
    pub preset_id: String,
    /// How far the count got
    pub count: u32,
    /// The preset's target at the time
    pub target: u32,
    /// Local calendar date of the session, `YYYY-MM-DD`
    pub date: String,
    /// Whether the target was reached
    pub completed: bool,
}

/// The tasbih counter: an active count over a selected preset plus the
/// append-only session history.
pub struct TasbihCounter {
    db: DatabaseConnection,
    sessions: Vec<TasbihSession>,
    preset: DhikrPreset,
    count: u32,
}

impl TasbihCounter {
    /// Loads the session history and starts an idle count under the given
    /// preset. A missing or unreadable history document yields an empty
    /// history.
    pub async fn load(db: DatabaseConnection, preset: DhikrPreset) -> Result<Self> {
        let sessions: Vec<TasbihSession> = match documents::load(&db, TASBIH_KEY).await {
            Ok(value) => value.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "stored tasbih history unreadable, starting empty");
                Vec::new()
            }
        };

        Ok(Self {
            db,
            sessions,
            preset,
            count: 0,
        })
    }

    /// The currently selected preset.
    #[must_use]
    pub fn preset(&self) -> &DhikrPreset {
        &self.preset
    }

    /// The current count of the active session.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether the active count has reached the preset's target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.count >= self.preset.target
    }

    /// All recorded sessions, newest first.
    #[must_use]
    pub fn sessions(&self) -> &[TasbihSession] {
        &self.sessions
    }

    /// Advances the count by one.
    ///
    /// On reaching the target exactly, a completed session is recorded
    /// once. Once at the target the count stops; further calls do not
    /// advance it or record anything. Returns the count after the call.
    pub async fn increment(&mut self) -> Result<u32> {
        if self.is_complete() {
            return Ok(self.count);
        }

        self.count += 1;
        if self.count == self.preset.target {
            self.record_session(true).await?;
        }

        Ok(self.count)
    }

    /// Zeroes the count, recording an incomplete session when progress
    /// would otherwise be lost (count strictly between zero and target).
    ///
    /// A failed snapshot write still zeroes the count; the error is
    /// returned with the snapshot already in memory.
    pub async fn reset(&mut self) -> Result<()> {
        let recorded = if self.count > 0 && !self.is_complete() {
            self.record_session(false).await
        } else {
            Ok(())
        };
        self.count = 0;

        recorded
    }

    /// Switches to a different preset, snapshotting abandoned progress as
    /// an incomplete session first. The count restarts at zero under the
    /// new preset even when the snapshot write fails.
    pub async fn switch_preset(&mut self, preset: DhikrPreset) -> Result<()> {
        let recorded = if self.count > 0 && !self.is_complete() {
            self.record_session(false).await
        } else {
            Ok(())
        };
        self.preset = preset;
        self.count = 0;

        recorded
    }

    /// Total dhikr counted today across all recorded sessions, completed
    /// or not.
    #[must_use]
    pub fn today_total(&self) -> u32 {
        self.total_for_date(dates::today())
    }

    /// Total dhikr recorded on the given local day.
    #[must_use]
    pub fn total_for_date(&self, day: NaiveDate) -> u32 {
        let key = dates::date_key(day);
        self.sessions
            .iter()
            .filter(|s| s.date == key)
            .map(|s| s.count)
            .sum()
    }

    async fn record_session(&mut self, completed: bool) -> Result<()> {
        let id = dates::time_ordered_id(self.sessions.first().map(|s| s.id.as_str()));
        let session = TasbihSession {
            id,
            preset_id: self.preset.id.clone(),
            count: self.count,
            target: self.preset.target,
            date: dates::date_key(dates::today()),
            completed,
        };

        self.sessions.insert(0, session);
        documents::save(&self.db, TASBIH_KEY, &self.sessions).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::config::presets::default_presets;
    use crate::errors::Error;
    use crate::test_utils::{drop_documents_table, setup_test_db};

    fn preset(id: &str, target: u32) -> DhikrPreset {
        DhikrPreset {
            id: id.to_string(),
            name: id.to_string(),
            name_arabic: String::new(),
            phrase_arabic: None,
            target,
        }
    }

    #[tokio::test]
    async fn test_reaching_target_records_completed_session() -> Result<()> {
        let db = setup_test_db().await?;
        let mut counter = TasbihCounter::load(db.clone(), preset("subhanallah", 3)).await?;

        assert_eq!(counter.increment().await?, 1);
        assert_eq!(counter.increment().await?, 2);
        assert!(counter.sessions().is_empty());

        assert_eq!(counter.increment().await?, 3);
        assert!(counter.is_complete());
        assert_eq!(counter.sessions().len(), 1);

        let session = &counter.sessions()[0];
        assert_eq!(session.preset_id, "subhanallah");
        assert_eq!(session.count, 3);
        assert_eq!(session.target, 3);
        assert!(session.completed);

        Ok(())
    }

    #[tokio::test]
    async fn test_incrementing_past_target_records_nothing_more() -> Result<()> {
        let db = setup_test_db().await?;
        let mut counter = TasbihCounter::load(db, preset("subhanallah", 2)).await?;

        counter.increment().await?;
        counter.increment().await?;
        assert_eq!(counter.sessions().len(), 1);

        // The count holds at the target and no further session appears
        assert_eq!(counter.increment().await?, 2);
        assert_eq!(counter.increment().await?, 2);
        assert_eq!(counter.sessions().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_reset_mid_count_records_incomplete_session() -> Result<()> {
        let db = setup_test_db().await?;
        let mut counter = TasbihCounter::load(db, preset("astaghfirullah", 10)).await?;

        counter.increment().await?;
        counter.increment().await?;
        counter.reset().await?;

        assert_eq!(counter.count(), 0);
        assert_eq!(counter.sessions().len(), 1);

        let session = &counter.sessions()[0];
        assert_eq!(session.count, 2);
        assert!(!session.completed);

        Ok(())
    }

    #[tokio::test]
    async fn test_reset_at_zero_records_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let mut counter = TasbihCounter::load(db, preset("subhanallah", 33)).await?;

        counter.reset().await?;

        assert_eq!(counter.count(), 0);
        assert!(counter.sessions().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_reset_after_completion_records_no_duplicate() -> Result<()> {
        let db = setup_test_db().await?;
        let mut counter = TasbihCounter::load(db, preset("subhanallah", 2)).await?;

        counter.increment().await?;
        counter.increment().await?;
        assert_eq!(counter.sessions().len(), 1);

        // The completed session was already recorded at the target
        counter.reset().await?;
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.sessions().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_switch_preset_snapshots_abandoned_progress() -> Result<()> {
        let db = setup_test_db().await?;
        let mut counter = TasbihCounter::load(db, preset("subhanallah", 33)).await?;

        counter.increment().await?;
        counter.increment().await?;
        counter.increment().await?;

        counter.switch_preset(preset("alhamdulillah", 33)).await?;

        assert_eq!(counter.count(), 0);
        assert_eq!(counter.preset().id, "alhamdulillah");
        assert_eq!(counter.sessions().len(), 1);

        // The snapshot belongs to the preset that was abandoned
        let session = &counter.sessions()[0];
        assert_eq!(session.preset_id, "subhanallah");
        assert_eq!(session.count, 3);
        assert!(!session.completed);

        Ok(())
    }

    #[tokio::test]
    async fn test_switch_preset_at_zero_records_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let mut counter = TasbihCounter::load(db, preset("subhanallah", 33)).await?;

        counter.switch_preset(preset("alhamdulillah", 33)).await?;

        assert!(counter.sessions().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_today_total_sums_all_sessions_for_today() -> Result<()> {
        let db = setup_test_db().await?;
        let mut counter = TasbihCounter::load(db, preset("subhanallah", 3)).await?;

        // One completed session (3) and one abandoned session (2)
        for _ in 0..3 {
            counter.increment().await?;
        }
        counter.reset().await?;
        counter.increment().await?;
        counter.increment().await?;
        counter.reset().await?;

        assert_eq!(counter.today_total(), 5);

        // Nothing recorded on other days
        let yesterday = dates::today().pred_opt().unwrap();
        assert_eq!(counter.total_for_date(yesterday), 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_write_failure_still_resets_the_count() -> Result<()> {
        let db = setup_test_db().await?;
        let mut counter = TasbihCounter::load(db.clone(), preset("subhanallah", 10)).await?;

        counter.increment().await?;
        counter.increment().await?;
        drop_documents_table(&db).await?;

        let result = counter.reset().await;

        assert!(matches!(result, Err(Error::Database(_))));
        // The snapshot and the zeroed count both stand for the session
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.sessions().len(), 1);
        assert_eq!(counter.sessions()[0].count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_history_survives_reload() -> Result<()> {
        let db = setup_test_db().await?;

        let mut counter = TasbihCounter::load(db.clone(), preset("subhanallah", 2)).await?;
        counter.increment().await?;
        counter.increment().await?;

        let first = default_presets().into_iter().next().unwrap();
        let reloaded = TasbihCounter::load(db, first).await?;

        assert_eq!(reloaded.sessions().len(), 1);
        assert_eq!(reloaded.count(), 0);
        assert_eq!(reloaded.today_total(), 2);

        Ok(())
    }
}
