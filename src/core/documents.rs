//! Typed key-value JSON document persistence.
//!
//! Every store in this crate persists its full state as one JSON document
//! under a fixed key in the `documents` table. These helpers cover the
//! load/save/delete cycle generically: values only need `serde` derives,
//! and the blobs stay limited to plain JSON-compatible shapes (strings,
//! numbers, booleans, arrays, flat objects) so they round-trip without
//! loss.

use crate::{
    entities::{Document, document},
    errors::Result,
};
use sea_orm::{ConnectionTrait, Set, prelude::*};
use serde::{Serialize, de::DeserializeOwned};

/// Loads and decodes the document stored under `key`.
///
/// Returns `Ok(None)` when no document exists under the key. A document
/// that exists but does not decode is an error; callers that treat the
/// blob as disposable recover by falling back to a default value.
pub async fn load<T, C>(db: &C, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    C: ConnectionTrait,
{
    let Some(stored) = Document::find_by_id(key).one(db).await? else {
        return Ok(None);
    };

    let value = serde_json::from_str(&stored.value)?;
    Ok(Some(value))
}

/// Encodes `value` as JSON and writes it under `key`, replacing any
/// previous document.
pub async fn save<T, C>(db: &C, key: &str, value: &T) -> Result<()>
where
    T: Serialize,
    C: ConnectionTrait,
{
    let encoded = serde_json::to_string(value)?;
    let now = chrono::Utc::now().naive_utc();

    match Document::find_by_id(key).one(db).await? {
        Some(existing) => {
            let mut active: document::ActiveModel = existing.into();
            active.value = Set(encoded);
            active.updated_at = Set(now);
            active.update(db).await?;
        }
        None => {
            let active = document::ActiveModel {
                key: Set(key.to_string()),
                value: Set(encoded),
                updated_at: Set(now),
            };
            active.insert(db).await?;
        }
    }

    Ok(())
}

/// Removes the document stored under `key`, if any.
pub async fn delete<C>(db: &C, key: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    Document::delete_by_id(key).exec(db).await?;
    Ok(())
}

/// Writes a raw, non-JSON string under `key`.
///
/// Only used by tests to simulate a corrupt document; production writes
/// always go through [`save`].
#[cfg(test)]
pub async fn save_raw<C>(db: &C, key: &str, raw: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let now = chrono::Utc::now().naive_utc();
    match Document::find_by_id(key).one(db).await? {
        Some(existing) => {
            let mut active: document::ActiveModel = existing.into();
            active.value = Set(raw.to_string());
            active.updated_at = Set(now);
            active.update(db).await?;
        }
        None => {
            let active = document::ActiveModel {
                key: Set(key.to_string()),
                value: Set(raw.to_string()),
                updated_at: Set(now),
            };
            active.insert(db).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::setup_test_db;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Sample {
        label: String,
        count: u32,
        flags: Vec<bool>,
    }

    fn sample() -> Sample {
        Sample {
            label: "noor".to_string(),
            count: 3,
            flags: vec![true, false],
        }
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() -> Result<()> {
        let db = setup_test_db().await?;

        save(&db, "sample", &sample()).await?;
        let loaded: Option<Sample> = load(&db, "sample").await?;

        assert_eq!(loaded, Some(sample()));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_missing_key_is_none() -> Result<()> {
        let db = setup_test_db().await?;

        let loaded: Option<Sample> = load(&db, "absent").await?;
        assert!(loaded.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_save_replaces_previous_document() -> Result<()> {
        let db = setup_test_db().await?;

        save(&db, "sample", &sample()).await?;
        let updated = Sample {
            count: 4,
            ..sample()
        };
        save(&db, "sample", &updated).await?;

        let loaded: Option<Sample> = load(&db, "sample").await?;
        assert_eq!(loaded, Some(updated));

        Ok(())
    }

    #[tokio::test]
    async fn test_load_corrupt_document_is_an_error() -> Result<()> {
        let db = setup_test_db().await?;

        save_raw(&db, "sample", "{not json").await?;
        let result: Result<Option<Sample>> = load(&db, "sample").await;

        assert!(matches!(result, Err(Error::Serialization(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_removes_document() -> Result<()> {
        let db = setup_test_db().await?;

        save(&db, "sample", &sample()).await?;
        delete(&db, "sample").await?;

        let loaded: Option<Sample> = load(&db, "sample").await?;
        assert!(loaded.is_none());

        // Deleting an absent key is a no-op
        delete(&db, "sample").await?;

        Ok(())
    }
}
