//! Dhikr preset configuration loading from config.toml
//!
//! This module provides the built-in dhikr presets used by the tasbih counter,
//! an optional override mechanism via a TOML configuration file, and the static
//! metadata table for the prayer-time calculation conventions offered during
//! onboarding.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default location of the preset override file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// A dhikr phrase with a repetition target, selectable on the tasbih screen
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DhikrPreset {
    /// Stable identifier recorded on every session (e.g., `"subhanallah"`)
    pub id: String,
    /// Transliterated name shown as the primary label
    pub name: String,
    /// Arabic rendering of the name
    pub name_arabic: String,
    /// Full Arabic phrase to recite; falls back to `name_arabic` when absent
    pub phrase_arabic: Option<String>,
    /// Repetition count that completes one session
    pub target: u32,
}

impl DhikrPreset {
    /// The Arabic text to display while counting.
    ///
    /// Display rule: the full phrase if present and non-empty, otherwise the
    /// Arabic name.
    #[must_use]
    pub fn display_phrase(&self) -> &str {
        match self.phrase_arabic.as_deref() {
            Some(phrase) if !phrase.is_empty() => phrase,
            _ => &self.name_arabic,
        }
    }
}

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of dhikr presets replacing the built-in set
    pub presets: Vec<DhikrPreset>,
}

/// A named prayer-time calculation convention offered during onboarding.
///
/// The angles are carried as metadata only; actual prayer-time astronomy is
/// out of scope and the schedule uses fixed placeholder times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationMethod {
    /// Stable identifier stored in onboarding settings (e.g., `"isna"`)
    pub id: &'static str,
    /// Short display name
    pub name: &'static str,
    /// Full organization name
    pub full_name: &'static str,
    /// Region where this convention is commonly used
    pub region: &'static str,
    /// Fajr twilight angle in degrees below the horizon
    pub fajr_angle: f64,
    /// Isha twilight angle in degrees below the horizon
    pub isha_angle: f64,
}

/// The calculation conventions offered during onboarding
pub const CALCULATION_METHODS: [CalculationMethod; 4] = [
    CalculationMethod {
        id: "isna",
        name: "ISNA",
        full_name: "Islamic Society of North America",
        region: "North America",
        fajr_angle: 15.0,
        isha_angle: 15.0,
    },
    CalculationMethod {
        id: "mwl",
        name: "Muslim World League",
        full_name: "Muslim World League",
        region: "Europe, Far East",
        fajr_angle: 18.0,
        isha_angle: 17.0,
    },
    CalculationMethod {
        id: "egypt",
        name: "Egyptian",
        full_name: "Egyptian General Authority of Survey",
        region: "Africa, Middle East",
        fajr_angle: 19.5,
        isha_angle: 17.5,
    },
    CalculationMethod {
        id: "makkah",
        name: "Umm al-Qura",
        full_name: "Umm al-Qura University, Makkah",
        region: "Saudi Arabia",
        fajr_angle: 18.5,
        isha_angle: 90.0,
    },
];

/// Identifier of the calculation convention selected by default
pub const DEFAULT_CALCULATION_METHOD: &str = "isna";

/// Looks up a calculation method by its identifier.
#[must_use]
pub fn calculation_method(id: &str) -> Option<&'static CalculationMethod> {
    CALCULATION_METHODS.iter().find(|method| method.id == id)
}

/// The built-in dhikr presets, used when no config.toml override exists.
#[must_use]
pub fn default_presets() -> Vec<DhikrPreset> {
    let phrases = [
        ("subhanallah", "SubhanAllah", "سُبْحَانَ اللهِ", 33),
        ("alhamdulillah", "Alhamdulillah", "الْحَمْدُ للهِ", 33),
        ("allahu-akbar", "Allahu Akbar", "اللهُ أَكْبَرُ", 34),
        ("la-ilaha-illallah", "La ilaha illallah", "لَا إِلَٰهَ إِلَّا اللهُ", 100),
        ("astaghfirullah", "Astaghfirullah", "أَسْتَغْفِرُ اللهَ", 100),
    ];

    let mut presets: Vec<DhikrPreset> = phrases
        .into_iter()
        .map(|(id, name, arabic, target)| DhikrPreset {
            id: id.to_string(),
            name: name.to_string(),
            name_arabic: arabic.to_string(),
            phrase_arabic: Some(arabic.to_string()),
            target,
        })
        .collect();

    // Free-count preset with no fixed phrase
    presets.push(DhikrPreset {
        id: "custom".to_string(),
        name: "Custom".to_string(),
        name_arabic: "مخصص".to_string(),
        phrase_arabic: None,
        target: 99,
    });

    presets
}

/// Loads preset configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the dhikr presets, preferring config.toml when it exists.
///
/// A configured preset list must be non-empty and every target must be a
/// positive count; a session could otherwise never complete.
pub fn load_presets() -> Result<Vec<DhikrPreset>> {
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        let config = load_config(DEFAULT_CONFIG_PATH)?;
        if config.presets.is_empty() {
            return Err(Error::Config {
                message: "config.toml must define at least one preset".to_string(),
            });
        }
        if let Some(bad) = config.presets.iter().find(|p| p.target == 0) {
            return Err(Error::Config {
                message: format!("Preset '{}' must have a target greater than zero", bad.id),
            });
        }
        Ok(config.presets)
    } else {
        Ok(default_presets())
    }
}
