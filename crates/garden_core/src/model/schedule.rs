//! Planting schedule model.
//!
//! A schedule ties one plant to one garden (both soft references) and carries
//! planned/actual dates plus embedded reminders.

use super::record::{Record, RecordData, RecordId, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored planting schedule record.
pub type PlantingSchedule = Record<ScheduleData>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScheduleStatus {
    Planned,
    Active,
    Completed,
    Cancelled,
    Delayed,
}

impl ScheduleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Delayed => "delayed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderType {
    SeedStart,
    Transplant,
    DirectSow,
    Water,
    Fertilize,
    Thin,
    Harvest,
    PestCheck,
    DiseaseCheck,
    SuccessionPlant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantingReminder {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ReminderType,
    pub date: DateTime<Utc>,
    pub message: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleData {
    pub garden_id: RecordId,
    pub plant_id: RecordId,
    #[serde(default)]
    pub square_ids: Vec<String>,
    pub planned_start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_plant_out_date: Option<DateTime<Utc>>,
    pub planned_harvest_start_date: DateTime<Utc>,
    pub planned_harvest_end_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_plant_out_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_harvest_start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_harvest_end_date: Option<DateTime<Utc>>,
    pub quantity: u32,
    pub is_succession_planting: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub succession_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub reminders: Vec<PlantingReminder>,
    pub status: ScheduleStatus,
}

impl RecordData for ScheduleData {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}
