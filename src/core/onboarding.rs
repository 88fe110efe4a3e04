//! Onboarding profile and settings store.
//!
//! Accumulates profile answers and configuration choices across the linear
//! onboarding flow entirely in memory, then persists everything at once
//! when the flow completes. The completion flag lives in its own document
//! so the launch path can check it without decoding the full data blob.
//!
//! `complete` is the one operation in the crate whose persistence failure
//! must be handled by the caller: swallowing it would trap the user in the
//! onboarding flow forever.

use crate::{
    config::presets,
    core::{dates, documents},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Storage key for the fast-path completion flag
pub const ONBOARDING_COMPLETE_KEY: &str = "onboarding_complete";
/// Storage key for the full onboarding data blob
pub const ONBOARDING_DATA_KEY: &str = "onboarding_data";

/// How the user addressed the gender question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Brother
    Male,
    /// Sister
    Female,
}

/// Age bracket selected during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeRange {
    /// 18-24
    #[serde(rename = "18-24")]
    Age18To24,
    /// 25-34
    #[serde(rename = "25-34")]
    Age25To34,
    /// 35-44
    #[serde(rename = "35-44")]
    Age35To44,
    /// 45-54
    #[serde(rename = "45-54")]
    Age45To54,
    /// 55 and above
    #[serde(rename = "55+")]
    Age55Plus,
}

/// Why the user picked up the app. Multiple selections allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motivation {
    /// Accurate prayer times
    PrayerTimes,
    /// Connect with the Quran
    QuranConnection,
    /// Build spiritual habits
    BuildHabits,
    /// Learn more about Islam
    LearnMore,
    /// Feel part of the Ummah
    Community,
    /// Grow spiritually
    SpiritualGrowth,
    /// Prepare for Ramadan
    RamadanPrep,
    /// New to Islam
    NewMuslim,
}

/// Stage of life selected during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    /// Studying
    Student,
    /// Early in a career
    EarlyCareer,
    /// Established in a career
    EstablishedCareer,
    /// Raising children
    Parent,
    /// Retired
    Retired,
    /// None of the listed stages
    Other,
}

/// Self-assessed familiarity with Islamic practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    /// Just beginning
    NewToIslam,
    /// Learning and growing
    Growing,
    /// Practicing regularly
    Practicing,
    /// Deep familiarity
    Knowledgeable,
}

/// Self-declared commitment level for daily practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Commitment {
    /// Exploring the practice
    Exploring,
    /// Working on consistency
    BuildingHabits,
    /// Consistent daily practice
    Consistent,
    /// Fully devoted
    Devoted,
}

/// Free-form profile facts collected during onboarding. Every field is
/// optional until the corresponding step is answered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Preferred name
    pub name: Option<String>,
    /// Gender selection
    pub gender: Option<Gender>,
    /// Age bracket
    pub age_range: Option<AgeRange>,
    /// Selected motivations, possibly empty
    #[serde(default)]
    pub motivations: Vec<Motivation>,
    /// Stage of life
    pub life_stage: Option<LifeStage>,
    /// Familiarity with Islamic practice
    pub islamic_experience: Option<Experience>,
    /// Commitment level
    pub commitment_level: Option<Commitment>,
}

/// A partial profile; `Some` fields overwrite the stored profile on merge.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// Preferred name
    pub name: Option<String>,
    /// Gender selection
    pub gender: Option<Gender>,
    /// Age bracket
    pub age_range: Option<AgeRange>,
    /// Replaces the motivation set wholesale when present
    pub motivations: Option<Vec<Motivation>>,
    /// Stage of life
    pub life_stage: Option<LifeStage>,
    /// Familiarity with Islamic practice
    pub islamic_experience: Option<Experience>,
    /// Commitment level
    pub commitment_level: Option<Commitment>,
}

/// How the location was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationMethod {
    /// From the device location service
    Auto,
    /// Typed in by the user
    Manual,
}

/// The user's location for prayer-time and qibla purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    /// Degrees north
    pub latitude: f64,
    /// Degrees east
    pub longitude: f64,
    /// Display name of the city
    pub city_name: String,
    /// How the location was obtained
    pub method: LocationMethod,
}

/// Prayer notification preferences. Delivery is out of scope; only the
/// preferences are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Master switch
    pub enabled: bool,
    /// Prayer ids notifications are enabled for (e.g., `"fajr"`)
    pub prayers: Vec<String>,
    /// Minutes before the scheduled time to remind
    pub reminder_minutes: u32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            prayers: Vec::new(),
            reminder_minutes: 15,
        }
    }
}

/// The persisted onboarding blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingData {
    /// Profile answers
    #[serde(default)]
    pub user_profile: UserProfile,
    /// Location, once granted or entered
    pub location: Option<LocationData>,
    /// Selected calculation convention id
    pub calculation_method: String,
    /// Notification preferences
    pub notifications: NotificationSettings,
    /// RFC 3339 timestamp of completion, absent until `complete` succeeds
    pub completed_at: Option<String>,
}

impl Default for OnboardingData {
    fn default() -> Self {
        Self {
            user_profile: UserProfile::default(),
            location: None,
            calculation_method: presets::DEFAULT_CALCULATION_METHOD.to_string(),
            notifications: NotificationSettings::default(),
            completed_at: None,
        }
    }
}

/// The onboarding store: in-memory answers plus the persisted completion
/// flag.
pub struct OnboardingStore {
    db: DatabaseConnection,
    complete: bool,
    data: OnboardingData,
}

impl OnboardingStore {
    /// Loads the completion flag and any previously persisted data.
    /// Missing or unreadable documents fall back to defaults with the flag
    /// cleared, which routes the user into the onboarding flow.
    pub async fn load(db: DatabaseConnection) -> Result<Self> {
        let complete = match documents::load::<bool, _>(&db, ONBOARDING_COMPLETE_KEY).await {
            Ok(value) => value.unwrap_or(false),
            Err(error) => {
                warn!(%error, "onboarding completion flag unreadable, treating as incomplete");
                false
            }
        };

        let data = match documents::load::<OnboardingData, _>(&db, ONBOARDING_DATA_KEY).await {
            Ok(value) => value.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "stored onboarding data unreadable, using defaults");
                OnboardingData::default()
            }
        };

        Ok(Self { db, complete, data })
    }

    /// Whether onboarding has been completed on this device.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The current in-memory onboarding data.
    #[must_use]
    pub fn data(&self) -> &OnboardingData {
        &self.data
    }

    /// The current profile answers.
    #[must_use]
    pub fn profile(&self) -> &UserProfile {
        &self.data.user_profile
    }

    /// The stored location, if any.
    #[must_use]
    pub fn location(&self) -> Option<&LocationData> {
        self.data.location.as_ref()
    }

    /// The selected calculation convention id.
    #[must_use]
    pub fn calculation_method(&self) -> &str {
        &self.data.calculation_method
    }

    /// The notification preferences.
    #[must_use]
    pub fn notifications(&self) -> &NotificationSettings {
        &self.data.notifications
    }

    /// Shallow-merges the update into the profile: `Some` fields overwrite,
    /// `None` fields leave the existing answer in place. In-memory only
    /// until [`Self::complete`].
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        let profile = &mut self.data.user_profile;

        if let Some(name) = update.name {
            profile.name = Some(name);
        }
        if let Some(gender) = update.gender {
            profile.gender = Some(gender);
        }
        if let Some(age_range) = update.age_range {
            profile.age_range = Some(age_range);
        }
        if let Some(motivations) = update.motivations {
            profile.motivations = motivations;
        }
        if let Some(life_stage) = update.life_stage {
            profile.life_stage = Some(life_stage);
        }
        if let Some(experience) = update.islamic_experience {
            profile.islamic_experience = Some(experience);
        }
        if let Some(commitment) = update.commitment_level {
            profile.commitment_level = Some(commitment);
        }
    }

    /// Sets the location after validating the city name (at least two
    /// characters once trimmed). In-memory only until [`Self::complete`].
    pub fn set_location(&mut self, location: LocationData) -> Result<()> {
        let city = location.city_name.trim();
        if city.len() < 2 {
            return Err(Error::Validation {
                message: "Please enter a valid city name".to_string(),
            });
        }

        self.data.location = Some(LocationData {
            city_name: city.to_string(),
            ..location
        });

        Ok(())
    }

    /// Selects a calculation convention by id. Unknown ids are rejected.
    /// In-memory only until [`Self::complete`].
    pub fn set_calculation_method(&mut self, method_id: &str) -> Result<()> {
        if presets::calculation_method(method_id).is_none() {
            return Err(Error::Validation {
                message: format!("Unknown calculation method: {method_id}"),
            });
        }

        self.data.calculation_method = method_id.to_string();
        Ok(())
    }

    /// Replaces the notification preferences. In-memory only until
    /// [`Self::complete`].
    pub fn set_notifications(&mut self, settings: NotificationSettings) {
        self.data.notifications = settings;
    }

    /// Stamps the completion time and persists the data blob and the
    /// completion flag.
    ///
    /// Unlike the routine mutations elsewhere in the crate, a persistence
    /// failure here leaves the in-memory state unchanged and must be
    /// handled by the caller; otherwise the user would re-enter onboarding
    /// on every launch despite having finished it.
    pub async fn complete(&mut self) -> Result<()> {
        let mut data = self.data.clone();
        data.completed_at = Some(dates::now_rfc3339());

        documents::save(&self.db, ONBOARDING_DATA_KEY, &data).await?;
        documents::save(&self.db, ONBOARDING_COMPLETE_KEY, &true).await?;

        self.data = data;
        self.complete = true;

        Ok(())
    }

    /// Clears the completion flag and the data blob, reverting to
    /// defaults. Used to re-enter the onboarding flow.
    pub async fn reset(&mut self) -> Result<()> {
        self.data = OnboardingData::default();
        self.complete = false;

        documents::delete(&self.db, ONBOARDING_COMPLETE_KEY).await?;
        documents::delete(&self.db, ONBOARDING_DATA_KEY).await?;

        Ok(())
    }
}
