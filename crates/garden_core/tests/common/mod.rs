#![allow(dead_code)]

use garden_core::model::garden::GardenData;
use garden_core::model::schedule::ScheduleData;
use garden_core::model::seed::SeedData;
use garden_core::{PlantData, RecordId};
use serde_json::{json, Value};

pub fn plant_json(name: &str, category: &str, days_to_maturity: u32) -> Value {
    json!({
        "name": name,
        "variety": "Common",
        "category": category,
        "daysToMaturity": days_to_maturity,
        "spacingInches": 12.0,
        "plantingDepthInches": 0.25,
        "sunRequirement": "full-sun",
        "waterRequirement": "moderate",
        "soilPH": { "min": 6.0, "max": 7.0 },
        "temperature": {
            "minGermination": 50.0,
            "maxGermination": 85.0,
            "growingMin": 55.0,
            "growingMax": 90.0
        },
        "harvestWindow": 21,
        "companionPlants": [],
        "antagonistPlants": [],
        "rotationFamily": "leafy-green",
        "difficultyLevel": "beginner",
        "isPerennial": false,
        "description": "",
        "growingTips": "",
        "commonPests": [],
        "commonDiseases": []
    })
}

pub fn plant(name: &str, category: &str, days_to_maturity: u32) -> PlantData {
    serde_json::from_value(plant_json(name, category, days_to_maturity)).unwrap()
}

pub fn seed(plant_id: RecordId, plant_name: &str) -> SeedData {
    serde_json::from_value(json!({
        "plantId": plant_id,
        "plantName": plant_name,
        "variety": "Common",
        "vendor": "Seed Co",
        "purchaseDate": "2024-02-01T00:00:00Z",
        "expirationDate": "2026-02-01T00:00:00Z",
        "quantity": 50,
        "unitType": "seeds",
        "organicCertified": true
    }))
    .unwrap()
}

pub fn garden(name: &str) -> GardenData {
    serde_json::from_value(json!({
        "name": name,
        "dimensions": { "width": 4.0, "height": 8.0 },
        "squares": [],
        "sunExposure": "full-sun",
        "isActive": true
    }))
    .unwrap()
}

pub fn schedule(garden_id: RecordId, plant_id: RecordId) -> ScheduleData {
    serde_json::from_value(json!({
        "gardenId": garden_id,
        "plantId": plant_id,
        "squareIds": ["0-0"],
        "plannedStartDate": "2025-03-01T00:00:00Z",
        "plannedHarvestStartDate": "2025-05-01T00:00:00Z",
        "plannedHarvestEndDate": "2025-06-01T00:00:00Z",
        "quantity": 4,
        "isSuccessionPlanting": false,
        "reminders": [],
        "status": "planned"
    }))
    .unwrap()
}

/// Wraps data fields into a snapshot record with the given id.
pub fn record_json(id: RecordId, mut data: Value) -> Value {
    let fields = data.as_object_mut().unwrap();
    fields.insert("id".to_string(), json!(id));
    fields.insert("createdAt".to_string(), json!("2025-01-01T00:00:00.000Z"));
    fields.insert("updatedAt".to_string(), json!("2025-01-02T00:00:00.000Z"));
    data
}

pub fn empty_snapshot() -> Value {
    json!({
        "version": "1.0.0",
        "exportDate": "2025-01-03T00:00:00.000Z",
        "gardens": [],
        "plants": [],
        "seedInventory": [],
        "schedules": []
    })
}
