//! In-memory plant filter engine.
//!
//! # Responsibility
//! - Evaluate a conjunction of optional predicates over loaded plants.
//!
//! # Invariants
//! - Every predicate is independent; absence (or an empty set) means "no
//!   constraint", so predicate order never changes the result.
//! - Output preserves input order; no ranking.
//! - Text matches name, variety, scientific name or description,
//!   case-insensitively. Surrounding whitespace is part of the query; only
//!   blank text is treated as "no constraint".

use crate::model::plant::{
    DifficultyLevel, Plant, PlantCategory, PlantData, SunRequirement, WaterRequirement,
};
use serde::{Deserialize, Serialize};

/// Inclusive numeric range; a missing bound is open on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn between(min: T, max: T) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: T) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: T) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Predicate set for plant search.
///
/// `Default` is the empty filter, which matches every plant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlantFilter {
    pub category: Vec<PlantCategory>,
    pub sun_requirement: Vec<SunRequirement>,
    pub water_requirement: Vec<WaterRequirement>,
    pub difficulty_level: Vec<DifficultyLevel>,
    pub days_to_maturity: Bounds<u32>,
    pub spacing: Bounds<f64>,
    pub is_perennial: Option<bool>,
    pub can_succession_plant: Option<bool>,
}

impl PlantFilter {
    /// Whether `data` satisfies every configured predicate.
    pub fn matches(&self, data: &PlantData) -> bool {
        in_set(&self.category, &data.category)
            && in_set(&self.sun_requirement, &data.sun_requirement)
            && in_set(&self.water_requirement, &data.water_requirement)
            && in_set(&self.difficulty_level, &data.difficulty_level)
            && self.days_to_maturity.contains(data.days_to_maturity)
            && self.spacing.contains(data.spacing_inches)
            && self
                .is_perennial
                .map_or(true, |wanted| data.is_perennial == wanted)
            && self
                .can_succession_plant
                .map_or(true, |wanted| data.can_succession_plant() == wanted)
    }
}

/// Filters `plants` by free text and `filter`, keeping input order.
pub fn filter_plants(plants: &[Plant], text: &str, filter: &PlantFilter) -> Vec<Plant> {
    let needle = text.to_lowercase();
    plants
        .iter()
        .filter(|plant| matches_text(&plant.data, &needle) && filter.matches(&plant.data))
        .cloned()
        .collect()
}

fn matches_text(data: &PlantData, needle: &str) -> bool {
    if needle.trim().is_empty() {
        return true;
    }
    let contains = |value: &str| value.to_lowercase().contains(needle);
    contains(&data.name)
        || contains(&data.variety)
        || data.scientific_name.as_deref().is_some_and(contains)
        || contains(&data.description)
}

fn in_set<T: PartialEq>(allowed: &[T], value: &T) -> bool {
    allowed.is_empty() || allowed.contains(value)
}
