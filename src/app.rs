//! Composition root.
//!
//! Builds every store exactly once at application start and hands them to
//! the presentation layer as plain owned fields - explicit dependency
//! injection, no ambient singletons. [`App::load`] resolves only when all
//! stores have finished their initial read, which is the signal the UI
//! waits for before leaving its loading state.

use crate::{
    config,
    core::{journal::Journal, onboarding::OnboardingStore, prayers::PrayerTracker, tasbih::TasbihCounter},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// All core services, constructed once and passed by reference to the
/// presentation layer.
pub struct App {
    /// Onboarding profile/settings store
    pub onboarding: OnboardingStore,
    /// Today's prayer checklist
    pub prayers: PrayerTracker,
    /// Spiritual journal
    pub journal: Journal,
    /// Tasbih counter and session history
    pub tasbih: TasbihCounter,
}

impl App {
    /// Full startup: environment, database connection, schema, then
    /// [`Self::load`].
    pub async fn bootstrap() -> Result<Self> {
        dotenvy::dotenv().ok();

        let db = config::database::create_connection().await?;
        config::database::create_tables(&db).await?;
        info!("database ready");

        Self::load(db).await
    }

    /// Loads every store from an existing connection, concurrently.
    /// Returns once all initial reads are done.
    pub async fn load(db: DatabaseConnection) -> Result<Self> {
        let presets = config::presets::load_presets()?;
        let initial_preset = presets.into_iter().next().ok_or_else(|| Error::Config {
            message: "No dhikr presets configured".to_string(),
        })?;

        let (onboarding, prayers, journal, tasbih) = tokio::try_join!(
            OnboardingStore::load(db.clone()),
            PrayerTracker::load(db.clone()),
            Journal::load(db.clone()),
            TasbihCounter::load(db, initial_preset),
        )?;
        info!("all stores loaded");

        Ok(Self {
            onboarding,
            prayers,
            journal,
            tasbih,
        })
    }
}

/// Initializes the tracing subscriber, honoring `RUST_LOG` and defaulting
/// to `info`. Called once by the host application before [`App::bootstrap`].
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
