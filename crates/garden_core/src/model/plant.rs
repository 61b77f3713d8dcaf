//! Plant reference model.
//!
//! # Responsibility
//! - Describe one cultivated variety and its growing parameters.
//! - Carry companion/antagonist relations by plant *name*.
//!
//! # Invariants
//! - `name` is not blank.
//! - `soil_ph.min <= soil_ph.max`.
//! - Companion and antagonist names are not required to exist; they are
//!   resolved at read time by [`crate::service::views`].

use super::record::{require_text, Record, RecordData, ValidationError};
use serde::{Deserialize, Serialize};

/// Stored plant record.
pub type Plant = Record<PlantData>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlantCategory {
    Vegetable,
    Fruit,
    Herb,
    Flower,
    Grain,
    Legume,
    Root,
    LeafyGreen,
    Brassica,
    Nightshade,
    Squash,
    Allium,
}

impl PlantCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vegetable => "vegetable",
            Self::Fruit => "fruit",
            Self::Herb => "herb",
            Self::Flower => "flower",
            Self::Grain => "grain",
            Self::Legume => "legume",
            Self::Root => "root",
            Self::LeafyGreen => "leafy-green",
            Self::Brassica => "brassica",
            Self::Nightshade => "nightshade",
            Self::Squash => "squash",
            Self::Allium => "allium",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SunRequirement {
    FullSun,
    PartialSun,
    PartialShade,
    FullShade,
}

impl SunRequirement {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullSun => "full-sun",
            Self::PartialSun => "partial-sun",
            Self::PartialShade => "partial-shade",
            Self::FullShade => "full-shade",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WaterRequirement {
    Low,
    Moderate,
    High,
}

impl WaterRequirement {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// Crop family used to avoid replanting related crops in the same soil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotationFamily {
    Nightshade,
    Brassica,
    Legume,
    Allium,
    Squash,
    Root,
    LeafyGreen,
    Grain,
    Perennial,
}

impl RotationFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nightshade => "nightshade",
            Self::Brassica => "brassica",
            Self::Legume => "legume",
            Self::Allium => "allium",
            Self::Squash => "squash",
            Self::Root => "root",
            Self::LeafyGreen => "leafy-green",
            Self::Grain => "grain",
            Self::Perennial => "perennial",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// Inclusive soil acidity window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilPh {
    pub min: f64,
    pub max: f64,
}

/// Temperatures in degrees Fahrenheit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureRange {
    pub min_germination: f64,
    pub max_germination: f64,
    pub growing_min: f64,
    pub growing_max: f64,
}

/// Caller-owned plant fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantData {
    pub name: String,
    pub variety: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    pub category: PlantCategory,
    pub days_to_maturity: u32,
    pub spacing_inches: f64,
    pub planting_depth_inches: f64,
    pub sun_requirement: SunRequirement,
    pub water_requirement: WaterRequirement,
    #[serde(rename = "soilPH")]
    pub soil_ph: SoilPh,
    pub temperature: TemperatureRange,
    /// Harvest window length in days.
    pub harvest_window: u32,
    /// Days between successive sowings; `None` when the crop is sown once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successive_planting_interval: Option<u32>,
    #[serde(default)]
    pub companion_plants: Vec<String>,
    #[serde(default)]
    pub antagonist_plants: Vec<String>,
    pub rotation_family: RotationFamily,
    pub difficulty_level: DifficultyLevel,
    pub is_perennial: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub growing_tips: String,
    #[serde(default)]
    pub common_pests: Vec<String>,
    #[serde(default)]
    pub common_diseases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutritional_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culinary_uses: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_starting_weeks_before_last_frost: Option<i32>,
    /// Negative values mean weeks before last frost, positive after.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_sow_weeks_before_after_last_frost: Option<i32>,
}

impl PlantData {
    /// Whether the plant declares a successive-planting interval.
    pub fn can_succession_plant(&self) -> bool {
        self.successive_planting_interval.is_some()
    }
}

impl RecordData for PlantData {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        if self.soil_ph.min > self.soil_ph.max {
            return Err(ValidationError::InvertedRange {
                field: "soilPH",
                min: self.soil_ph.min,
                max: self.soil_ph.max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn plant_data(name: &str, category: PlantCategory, days_to_maturity: u32) -> PlantData {
        PlantData {
            name: name.to_string(),
            variety: "Common".to_string(),
            scientific_name: None,
            category,
            days_to_maturity,
            spacing_inches: 12.0,
            planting_depth_inches: 0.25,
            sun_requirement: SunRequirement::FullSun,
            water_requirement: WaterRequirement::Moderate,
            soil_ph: SoilPh { min: 6.0, max: 7.0 },
            temperature: TemperatureRange {
                min_germination: 50.0,
                max_germination: 85.0,
                growing_min: 55.0,
                growing_max: 90.0,
            },
            harvest_window: 21,
            successive_planting_interval: None,
            companion_plants: Vec::new(),
            antagonist_plants: Vec::new(),
            rotation_family: RotationFamily::LeafyGreen,
            difficulty_level: DifficultyLevel::Beginner,
            is_perennial: false,
            description: String::new(),
            growing_tips: String::new(),
            common_pests: Vec::new(),
            common_diseases: Vec::new(),
            nutritional_value: None,
            culinary_uses: None,
            storage_info: None,
            seed_starting_weeks_before_last_frost: None,
            direct_sow_weeks_before_after_last_frost: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::plant_data;
    use super::*;

    #[test]
    fn validate_rejects_inverted_ph_range() {
        let mut data = plant_data("Basil", PlantCategory::Herb, 60);
        data.soil_ph = SoilPh { min: 7.5, max: 6.0 };
        let err = data.validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvertedRange { field: "soilPH", .. }));
    }

    #[test]
    fn validate_rejects_blank_name() {
        let data = plant_data("   ", PlantCategory::Herb, 60);
        assert_eq!(data.validate(), Err(ValidationError::EmptyField("name")));
    }

    #[test]
    fn wire_names_use_kebab_case_and_soil_ph_key() {
        let data = plant_data("Lettuce", PlantCategory::LeafyGreen, 45);
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["category"], "leafy-green");
        assert_eq!(value["sunRequirement"], "full-sun");
        assert_eq!(value["soilPH"]["min"], 6.0);
        assert!(value.get("scientificName").is_none());
    }
}
