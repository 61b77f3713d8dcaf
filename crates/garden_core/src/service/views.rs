//! Derived read views over loaded collections.
//!
//! # Responsibility
//! - Group, resolve and count records without touching storage.
//!
//! # Invariants
//! - Functions are pure: same input slices, same output.
//! - Name-based relations resolve by case-insensitive exact match without
//!   trimming; names with no matching plant are dropped, not reported.

use crate::model::garden::Garden;
use crate::model::plant::{Plant, PlantCategory};
use crate::model::record::RecordId;
use crate::model::schedule::PlantingSchedule;
use crate::model::seed::SeedInventory;
use serde::Serialize;
use std::collections::BTreeMap;

/// Record counts for the four keyed collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionCounts {
    pub plants: u64,
    pub seeds: u64,
    pub gardens: u64,
    pub schedules: u64,
}

impl CollectionCounts {
    pub fn from_collections(
        plants: &[Plant],
        seeds: &[SeedInventory],
        gardens: &[Garden],
        schedules: &[PlantingSchedule],
    ) -> Self {
        Self {
            plants: plants.len() as u64,
            seeds: seeds.len() as u64,
            gardens: gardens.len() as u64,
            schedules: schedules.len() as u64,
        }
    }
}

/// Plants bucketed by category, keeping input order inside each bucket.
pub fn group_by_category(plants: &[Plant]) -> BTreeMap<PlantCategory, Vec<Plant>> {
    let mut groups: BTreeMap<PlantCategory, Vec<Plant>> = BTreeMap::new();
    for plant in plants {
        groups
            .entry(plant.data.category)
            .or_default()
            .push(plant.clone());
    }
    groups
}

pub fn plant_by_id(plants: &[Plant], id: RecordId) -> Option<&Plant> {
    plants.iter().find(|plant| plant.id == id)
}

pub fn seeds_for_plant(seeds: &[SeedInventory], plant_id: RecordId) -> Vec<&SeedInventory> {
    seeds
        .iter()
        .filter(|seed| seed.data.plant_id == plant_id)
        .collect()
}

/// Plants named in the companion list of plant `id`.
///
/// Unknown `id` yields an empty list.
pub fn companion_plants(plants: &[Plant], id: RecordId) -> Vec<&Plant> {
    plant_by_id(plants, id)
        .map(|plant| resolve_names(plants, &plant.data.companion_plants))
        .unwrap_or_default()
}

/// Plants named in the antagonist list of plant `id`.
pub fn antagonist_plants(plants: &[Plant], id: RecordId) -> Vec<&Plant> {
    plant_by_id(plants, id)
        .map(|plant| resolve_names(plants, &plant.data.antagonist_plants))
        .unwrap_or_default()
}

fn resolve_names<'a>(plants: &'a [Plant], names: &[String]) -> Vec<&'a Plant> {
    names
        .iter()
        .filter_map(|name| {
            let wanted = name.to_lowercase();
            plants
                .iter()
                .find(|candidate| candidate.data.name.to_lowercase() == wanted)
        })
        .collect()
}
