//! User preferences model.
//!
//! # Responsibility
//! - Hold location/frost dates, display units, notification and backup
//!   settings.
//! - Provide the default record created on first launch.
//!
//! # Invariants
//! - Exactly one preferences record is treated as current; the singleton is
//!   enforced by the repository, not by this type.
//! - `location.hardiness_zone` looks like a USDA zone (`6`, `6a`, `10b`).

use super::plant::{DifficultyLevel, PlantCategory};
use super::record::{Record, RecordData, ValidationError};
use super::schedule::ReminderType;
use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HARDINESS_ZONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}[ab]?$").expect("valid hardiness zone regex"));

/// Stored preferences record.
pub type UserPreferences = Record<PreferencesData>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Units {
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GardeningStyle {
    SquareFoot,
    Container,
    RaisedBed,
    InGround,
    Hydroponic,
    Vertical,
    Greenhouse,
    Permaculture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationFrequency {
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackupFrequency {
    Daily,
    Weekly,
    Monthly,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesLocation {
    pub hardiness_zone: String,
    pub last_frost_date: DateTime<Utc>,
    pub first_frost_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub enabled: bool,
    #[serde(default)]
    pub reminder_types: Vec<ReminderType>,
    pub frequency: NotificationFrequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSyncSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_backup: Option<DateTime<Utc>>,
    pub auto_backup: bool,
    pub backup_frequency: BackupFrequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesData {
    pub location: PreferencesLocation,
    pub units: Units,
    pub experience_level: DifficultyLevel,
    #[serde(default)]
    pub favorite_categories: Vec<PlantCategory>,
    #[serde(default)]
    pub gardening_style: Vec<GardeningStyle>,
    pub notifications: NotificationSettings,
    pub data_sync: DataSyncSettings,
}

impl PreferencesData {
    /// First-launch defaults for the given calendar year.
    ///
    /// Zone `6a`, last frost April 15, first frost October 15, imperial units.
    pub fn default_for_year(year: i32) -> Self {
        Self {
            location: PreferencesLocation {
                hardiness_zone: "6a".to_string(),
                last_frost_date: midnight_utc(year, 4, 15),
                first_frost_date: midnight_utc(year, 10, 15),
                latitude: None,
                longitude: None,
            },
            units: Units::Imperial,
            experience_level: DifficultyLevel::Beginner,
            favorite_categories: vec![PlantCategory::Vegetable, PlantCategory::Herb],
            gardening_style: vec![GardeningStyle::SquareFoot],
            notifications: NotificationSettings {
                enabled: true,
                reminder_types: vec![
                    ReminderType::SeedStart,
                    ReminderType::Transplant,
                    ReminderType::Harvest,
                ],
                frequency: NotificationFrequency::Weekly,
            },
            data_sync: DataSyncSettings {
                last_backup: None,
                auto_backup: true,
                backup_frequency: BackupFrequency::Weekly,
            },
        }
    }
}

impl RecordData for PreferencesData {
    fn validate(&self) -> Result<(), ValidationError> {
        let zone = self.location.hardiness_zone.trim();
        if !HARDINESS_ZONE_RE.is_match(zone) {
            return Err(ValidationError::InvalidValue {
                field: "location.hardinessZone",
                message: format!("`{zone}` is not a hardiness zone"),
            });
        }
        Ok(())
    }
}

fn midnight_utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    // Apr 15 and Oct 15 exist in every year.
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}
