//! Seed inventory model.
//!
//! `plant_id` is a soft reference: the store neither checks that the plant
//! exists nor clears the reference when the plant is deleted. `plant_name` and
//! `variety` are denormalized copies kept for display without a join.
//!
//! `expiration_date >= purchase_date` is expected but not enforced.

use super::record::{require_text, Record, RecordData, RecordId, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored seed inventory record.
pub type SeedInventory = Record<SeedData>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedUnitType {
    Seeds,
    Grams,
    Ounces,
    Packets,
}

impl SeedUnitType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seeds => "seeds",
            Self::Grams => "grams",
            Self::Ounces => "ounces",
            Self::Packets => "packets",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TreatmentType {
    Untreated,
    OrganicTreated,
    ConventionalTreated,
    Pelleted,
}

impl TreatmentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Untreated => "untreated",
            Self::OrganicTreated => "organic-treated",
            Self::ConventionalTreated => "conventional-treated",
            Self::Pelleted => "pelleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    pub plant_id: RecordId,
    pub plant_name: String,
    pub variety: String,
    pub vendor: String,
    pub purchase_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    pub quantity: f64,
    pub unit_type: SeedUnitType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,
    /// Percentage, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub germination_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub germination_test_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_unit: Option<f64>,
    pub organic_certified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_type: Option<TreatmentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_custom_variety: bool,
    /// Source lot for seeds saved from an earlier harvest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_seed_id: Option<RecordId>,
}

impl RecordData for SeedData {
    fn validate(&self) -> Result<(), ValidationError> {
        require_text("plantName", &self.plant_name)?;
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "quantity",
                message: format!("expected a non-negative number, got {}", self.quantity),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn seed_data(plant_id: RecordId, plant_name: &str) -> SeedData {
        SeedData {
            plant_id,
            plant_name: plant_name.to_string(),
            variety: "Common".to_string(),
            vendor: "Seed Co".to_string(),
            purchase_date: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            expiration_date: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
            quantity: 100.0,
            unit_type: SeedUnitType::Seeds,
            lot_number: None,
            germination_rate: None,
            germination_test_date: None,
            cost_per_unit: None,
            organic_certified: false,
            treatment_type: None,
            storage_location: None,
            notes: None,
            is_custom_variety: false,
            parent_seed_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::seed_data;
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    #[test]
    fn expiration_before_purchase_is_accepted() {
        let mut data = seed_data(Uuid::new_v4(), "Basil");
        data.expiration_date = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert!(data.validate().is_ok());
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let mut data = seed_data(Uuid::new_v4(), "Basil");
        data.quantity = -1.0;
        assert!(matches!(
            data.validate(),
            Err(ValidationError::InvalidValue {
                field: "quantity",
                ..
            })
        ));
    }
}
