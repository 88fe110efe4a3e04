//! Shared test utilities for `NoorCore`.
//!
//! This module provides common helper functions for setting up test
//! databases and sample records with sensible defaults.

use crate::core::onboarding::{LocationData, LocationMethod};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

/// Creates an in-memory `SQLite` database with the document table
/// initialized. This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Drops the document table so the next write fails, simulating a
/// persistence failure while the in-memory state stays intact.
pub async fn drop_documents_table(db: &DatabaseConnection) -> Result<()> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "DROP TABLE documents".to_string(),
    ))
    .await?;
    Ok(())
}

/// A valid location for onboarding tests.
#[must_use]
pub fn sample_location() -> LocationData {
    LocationData {
        latitude: 40.7128,
        longitude: -74.0060,
        city_name: "New York".to_string(),
        method: LocationMethod::Auto,
    }
}
