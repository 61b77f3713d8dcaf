//! Garden layout model.
//!
//! # Responsibility
//! - Describe a bed/plot with its grid of squares.
//! - Own [`GardenSquare`] values; squares have no lifecycle of their own.
//!
//! # Invariants
//! - `name` is not blank; both dimensions are positive.
//! - Square coordinates are expected to be unique per garden but are not
//!   checked here.
//! - Deleting a garden deletes its planting schedules (see
//!   [`crate::repo::record_repo`]).

use super::record::{require_text, Record, RecordData, RecordId, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored garden record.
pub type Garden = Record<GardenData>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoilType {
    Clay,
    Sand,
    Loam,
    Silt,
    Chalk,
    Peat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SunExposure {
    FullSun,
    PartialSun,
    PartialShade,
    FullShade,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IrrigationType {
    HandWatering,
    Drip,
    Sprinkler,
    SoakerHose,
    RainOnly,
}

/// Growth stage of a single square. Transitions are advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlantingStatus {
    Empty,
    Planned,
    Seeded,
    Germinated,
    Transplanted,
    Growing,
    Flowering,
    Fruiting,
    Harvesting,
    Harvested,
    Composted,
    Failed,
}

/// Width and height in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardiness_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_frost_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_frost_date: Option<DateTime<Utc>>,
}

/// One grid cell of a garden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenSquare {
    pub id: String,
    pub x: u32,
    pub y: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planted_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_harvest_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_harvest_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: PlantingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_unit: Option<String>,
    /// 1-5 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_rating: Option<u8>,
}

impl GardenSquare {
    /// Creates an empty square at grid position `(x, y)`.
    pub fn empty(x: u32, y: u32) -> Self {
        Self {
            id: format!("{x}-{y}"),
            x,
            y,
            plant_id: None,
            planted_date: None,
            expected_harvest_date: None,
            actual_harvest_date: None,
            quantity: None,
            notes: None,
            status: PlantingStatus::Empty,
            yield_amount: None,
            yield_unit: None,
            success_rating: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub dimensions: Dimensions,
    #[serde(default)]
    pub squares: Vec<GardenSquare>,
    #[serde(default)]
    pub location: GardenLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<SoilType>,
    pub sun_exposure: SunExposure,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irrigation_type: Option<IrrigationType>,
    pub is_active: bool,
}

impl RecordData for GardenData {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        let Dimensions { width, height } = self.dimensions;
        if !(width > 0.0 && height > 0.0) {
            return Err(ValidationError::InvalidValue {
                field: "dimensions",
                message: format!("expected positive width and height, got {width}x{height}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn garden_data(name: &str) -> GardenData {
        GardenData {
            name: name.to_string(),
            description: None,
            dimensions: Dimensions {
                width: 4.0,
                height: 8.0,
            },
            squares: vec![GardenSquare::empty(0, 0), GardenSquare::empty(1, 0)],
            location: GardenLocation::default(),
            soil_type: Some(SoilType::Loam),
            sun_exposure: SunExposure::FullSun,
            irrigation_type: None,
            is_active: true,
        }
    }
}
