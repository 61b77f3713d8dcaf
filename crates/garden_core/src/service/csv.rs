//! Tabular CSV export for plants and seed inventory.
//!
//! Every field is double-quoted with embedded quotes doubled, rows are joined
//! by `\n` without a trailing newline, list fields are joined by `"; "` and
//! dates render as `YYYY-MM-DD`. There is no CSV import path.

use crate::model::plant::Plant;
use crate::model::seed::SeedInventory;
use chrono::{DateTime, Utc};

const PLANT_HEADERS: [&str; 18] = [
    "Name",
    "Variety",
    "Scientific Name",
    "Category",
    "Days to Maturity",
    "Spacing (inches)",
    "Planting Depth (inches)",
    "Sun Requirement",
    "Water Requirement",
    "Soil pH Min",
    "Soil pH Max",
    "Difficulty Level",
    "Is Perennial",
    "Description",
    "Growing Tips",
    "Companion Plants",
    "Antagonist Plants",
    "Rotation Family",
];

const SEED_HEADERS: [&str; 15] = [
    "Plant Name",
    "Variety",
    "Vendor",
    "Purchase Date",
    "Expiration Date",
    "Quantity",
    "Unit Type",
    "Lot Number",
    "Germination Rate (%)",
    "Cost Per Unit",
    "Organic Certified",
    "Treatment Type",
    "Storage Location",
    "Notes",
    "Is Custom Variety",
];

pub fn plants_to_csv(plants: &[Plant]) -> String {
    let rows = plants.iter().map(|plant| {
        let data = &plant.data;
        vec![
            data.name.clone(),
            data.variety.clone(),
            data.scientific_name.clone().unwrap_or_default(),
            data.category.as_str().to_string(),
            data.days_to_maturity.to_string(),
            data.spacing_inches.to_string(),
            data.planting_depth_inches.to_string(),
            data.sun_requirement.as_str().to_string(),
            data.water_requirement.as_str().to_string(),
            data.soil_ph.min.to_string(),
            data.soil_ph.max.to_string(),
            data.difficulty_level.as_str().to_string(),
            data.is_perennial.to_string(),
            data.description.clone(),
            data.growing_tips.clone(),
            data.companion_plants.join("; "),
            data.antagonist_plants.join("; "),
            data.rotation_family.as_str().to_string(),
        ]
    });
    render(&PLANT_HEADERS, rows)
}

pub fn seeds_to_csv(seeds: &[SeedInventory]) -> String {
    let rows = seeds.iter().map(|seed| {
        let data = &seed.data;
        vec![
            data.plant_name.clone(),
            data.variety.clone(),
            data.vendor.clone(),
            format_date(data.purchase_date),
            format_date(data.expiration_date),
            data.quantity.to_string(),
            data.unit_type.as_str().to_string(),
            data.lot_number.clone().unwrap_or_default(),
            optional(data.germination_rate),
            optional(data.cost_per_unit),
            data.organic_certified.to_string(),
            data.treatment_type
                .map(|treatment| treatment.as_str().to_string())
                .unwrap_or_default(),
            data.storage_location.clone().unwrap_or_default(),
            data.notes.clone().unwrap_or_default(),
            data.is_custom_variety.to_string(),
        ]
    });
    render(&SEED_HEADERS, rows)
}

fn render(headers: &[&str], rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut lines = vec![headers
        .iter()
        .map(|header| quote(header))
        .collect::<Vec<_>>()
        .join(",")];
    lines.extend(rows.map(|row| {
        row.iter()
            .map(|field| quote(field))
            .collect::<Vec<_>>()
            .join(",")
    }));
    lines.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn format_date(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

fn optional(value: Option<f64>) -> String {
    value.map(|number| number.to_string()).unwrap_or_default()
}
