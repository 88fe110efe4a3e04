//! Spiritual journal store.
//!
//! An append-only-with-delete list of reflections, newest first. Entries are
//! immutable once created; there is deliberately no edit operation. The full
//! list is persisted as one JSON document on every mutation.

use crate::{
    core::{dates, documents},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Storage key for the journal document
pub const JOURNAL_KEY: &str = "journal";

/// Mood tag a reflection can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Thankful
    Grateful,
    /// Calm
    Peaceful,
    /// Contemplative
    Reflective,
    /// Optimistic
    Hopeful,
    /// Having a hard time
    Struggling,
}

/// A single journal reflection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Time-ordered identifier, strictly increasing in creation order
    pub id: String,
    /// Local calendar date of creation, `YYYY-MM-DD`
    pub date: String,
    /// The reflection text, trimmed and never empty
    pub content: String,
    /// Optional mood tag
    pub mood: Option<Mood>,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    /// RFC 3339 last-update timestamp; equals `created_at` since entries
    /// are immutable after creation
    pub updated_at: String,
}

/// The journal store: in-memory entries, newest first, with write-through
/// persistence.
pub struct Journal {
    db: DatabaseConnection,
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Loads all entries from storage. A missing or unreadable document
    /// yields an empty journal.
    pub async fn load(db: DatabaseConnection) -> Result<Self> {
        let entries: Vec<JournalEntry> = match documents::load(&db, JOURNAL_KEY).await {
            Ok(value) => value.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "stored journal unreadable, starting empty");
                Vec::new()
            }
        };

        Ok(Self { db, entries })
    }

    /// All entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Entries created on the given local day, newest first.
    #[must_use]
    pub fn entries_for_date(&self, day: NaiveDate) -> Vec<&JournalEntry> {
        let key = dates::date_key(day);
        self.entries.iter().filter(|e| e.date == key).collect()
    }

    /// Creates a new entry from the trimmed content and persists the list.
    ///
    /// Empty or whitespace-only content is rejected with a validation error
    /// before any state changes. Returns the created entry.
    pub async fn add(&mut self, content: &str, mood: Option<Mood>) -> Result<&JournalEntry> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation {
                message: "Journal entry content cannot be empty".to_string(),
            });
        }

        let id = dates::time_ordered_id(self.entries.first().map(|e| e.id.as_str()));
        let now = dates::now_rfc3339();
        let entry = JournalEntry {
            id,
            date: dates::date_key(dates::today()),
            content: trimmed.to_string(),
            mood,
            created_at: now.clone(),
            updated_at: now,
        };

        self.entries.insert(0, entry);
        self.persist().await?;

        Ok(&self.entries[0])
    }

    /// Removes the entry with the given id and persists the list.
    ///
    /// An absent id is a no-op, not an error.
    pub async fn delete(&mut self, id: &str) -> Result<()> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);

        if self.entries.len() == before {
            return Ok(());
        }

        self.persist().await
    }

    async fn persist(&self) -> Result<()> {
        documents::save(&self.db, JOURNAL_KEY, &self.entries).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{drop_documents_table, setup_test_db};

    #[tokio::test]
    async fn test_add_rejects_empty_content() -> Result<()> {
        let db = setup_test_db().await?;
        let mut journal = Journal::load(db).await?;

        let empty = journal.add("", None).await;
        assert!(matches!(empty, Err(Error::Validation { .. })));

        let whitespace = journal.add("   ", Some(Mood::Grateful)).await;
        assert!(matches!(whitespace, Err(Error::Validation { .. })));

        assert!(journal.entries().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_add_trims_and_prepends() -> Result<()> {
        let db = setup_test_db().await?;
        let mut journal = Journal::load(db).await?;

        journal.add("first reflection", None).await?;
        let entry = journal.add("  second reflection  ", Some(Mood::Peaceful)).await?;

        assert_eq!(entry.content, "second reflection");
        assert_eq!(entry.created_at, entry.updated_at);

        assert_eq!(journal.entries().len(), 2);
        assert_eq!(journal.entries()[0].content, "second reflection");
        assert_eq!(journal.entries()[1].content, "first reflection");

        Ok(())
    }

    #[tokio::test]
    async fn test_ids_increase_in_creation_order() -> Result<()> {
        let db = setup_test_db().await?;
        let mut journal = Journal::load(db).await?;

        for i in 0..5 {
            journal.add(&format!("entry {i}"), None).await?;
        }

        // Newest first, so ids must strictly decrease down the list
        let ids: Vec<i64> = journal
            .entries()
            .iter()
            .map(|e| e.id.parse::<i64>().unwrap())
            .collect();
        assert!(ids.windows(2).all(|pair| pair[0] > pair[1]));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_entry() -> Result<()> {
        let db = setup_test_db().await?;
        let mut journal = Journal::load(db).await?;

        journal.add("keep me", None).await?;
        let target = journal.add("delete me", None).await?.id.clone();

        journal.delete(&target).await?;

        assert_eq!(journal.entries().len(), 1);
        assert_eq!(journal.entries()[0].content, "keep me");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_absent_id_is_a_no_op() -> Result<()> {
        let db = setup_test_db().await?;
        let mut journal = Journal::load(db).await?;

        journal.add("only entry", None).await?;
        journal.delete("1234567890").await?;

        assert_eq!(journal.entries().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_entries_survive_reload() -> Result<()> {
        let db = setup_test_db().await?;

        let mut journal = Journal::load(db.clone()).await?;
        journal.add("persisted reflection", Some(Mood::Hopeful)).await?;

        let reloaded = Journal::load(db).await?;
        assert_eq!(reloaded.entries().len(), 1);
        assert_eq!(reloaded.entries()[0].content, "persisted reflection");
        assert_eq!(reloaded.entries()[0].mood, Some(Mood::Hopeful));

        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_document_starts_empty() -> Result<()> {
        let db = setup_test_db().await?;

        documents::save_raw(&db, JOURNAL_KEY, "[{broken").await?;

        let journal = Journal::load(db).await?;
        assert!(journal.entries().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_write_failure_keeps_entry_in_memory() -> Result<()> {
        let db = setup_test_db().await?;
        let mut journal = Journal::load(db.clone()).await?;

        drop_documents_table(&db).await?;

        let result = journal.add("unsaved reflection", None).await;
        assert!(matches!(result, Err(Error::Database(_))));

        // Durability was lost but the session still shows the entry
        assert_eq!(journal.entries().len(), 1);
        assert_eq!(journal.entries()[0].content, "unsaved reflection");

        Ok(())
    }

    #[tokio::test]
    async fn test_entries_for_date_filters_by_day() -> Result<()> {
        let db = setup_test_db().await?;
        let mut journal = Journal::load(db).await?;

        journal.add("today's entry", None).await?;

        let today = dates::today();
        assert_eq!(journal.entries_for_date(today).len(), 1);

        let other_day = today.pred_opt().unwrap();
        assert!(journal.entries_for_date(other_day).is_empty());

        Ok(())
    }
}
