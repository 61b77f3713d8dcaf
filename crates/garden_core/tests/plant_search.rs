mod common;

use common::{plant, seed};
use garden_core::service::csv::{plants_to_csv, seeds_to_csv};
use garden_core::service::views::{companion_plants, group_by_category};
use garden_core::{
    filter_plants, Bounds, GardenStore, Plant, PlantCategory, PlantFilter, RecordRepository,
};

fn catalog(store: &GardenStore) -> Vec<Plant> {
    let mut basil = plant("Basil", "herb", 60);
    basil.companion_plants = vec!["tomato".to_string(), "Unobtainium".to_string()];
    store.plants().add(basil).unwrap();
    store.plants().add(plant("Chives", "herb", 25)).unwrap();
    let mut rosemary = plant("Rosemary", "herb", 90);
    rosemary.is_perennial = true;
    store.plants().add(rosemary).unwrap();
    store.plants().add(plant("Tomato", "nightshade", 75)).unwrap();
    store.plants().list().unwrap()
}

fn names(plants: &[Plant]) -> Vec<&str> {
    plants.iter().map(|plant| plant.data.name.as_str()).collect()
}

#[test]
fn category_and_minimum_days_form_a_conjunction() {
    let store = GardenStore::open_in_memory().unwrap();
    let plants = catalog(&store);

    let filter = PlantFilter {
        category: vec![PlantCategory::Herb],
        days_to_maturity: Bounds::at_least(30),
        ..PlantFilter::default()
    };
    assert_eq!(names(&filter_plants(&plants, "", &filter)), vec!["Basil", "Rosemary"]);

    let perennial_herbs = PlantFilter {
        is_perennial: Some(true),
        ..filter
    };
    assert_eq!(
        names(&filter_plants(&plants, "", &perennial_herbs)),
        vec!["Rosemary"]
    );
}

#[test]
fn empty_category_set_does_not_filter() {
    let store = GardenStore::open_in_memory().unwrap();
    let plants = catalog(&store);

    let filter = PlantFilter {
        category: Vec::new(),
        days_to_maturity: Bounds::between(60, 75),
        ..PlantFilter::default()
    };
    assert_eq!(names(&filter_plants(&plants, "", &filter)), vec!["Basil", "Tomato"]);
}

#[test]
fn filter_preserves_input_order() {
    let store = GardenStore::open_in_memory().unwrap();
    let mut plants = catalog(&store);
    plants.reverse();
    let result = filter_plants(&plants, "", &PlantFilter::default());
    assert_eq!(names(&result), vec!["Tomato", "Rosemary", "Chives", "Basil"]);
}

#[test]
fn stored_search_agrees_with_filter_on_shared_predicates() {
    let store = GardenStore::open_in_memory().unwrap();
    let plants = catalog(&store);
    let filter = PlantFilter {
        category: vec![PlantCategory::Herb],
        days_to_maturity: Bounds::at_least(30),
        ..PlantFilter::default()
    };

    let stored = store.search_plants("", &filter).unwrap();
    assert_eq!(stored, filter_plants(&plants, "", &filter));
    assert_eq!(names(&store.search_plants("ROSE", &PlantFilter::default()).unwrap()), vec!["Rosemary"]);
}

#[test]
fn companion_resolution_omits_unknown_names() {
    let store = GardenStore::open_in_memory().unwrap();
    let plants = catalog(&store);
    let basil = plants.iter().find(|plant| plant.data.name == "Basil").unwrap();

    let companions = companion_plants(&plants, basil.id);
    assert_eq!(companions.len(), 1);
    assert_eq!(companions[0].data.name, "Tomato");
}

#[test]
fn grouping_buckets_loaded_plants() {
    let store = GardenStore::open_in_memory().unwrap();
    let plants = catalog(&store);
    let groups = group_by_category(&plants);
    assert_eq!(groups[&PlantCategory::Herb].len(), 3);
    assert_eq!(groups[&PlantCategory::Nightshade].len(), 1);
}

#[test]
fn csv_export_has_one_row_per_record() {
    let store = GardenStore::open_in_memory().unwrap();
    let plants = catalog(&store);
    let basil_id = plants[0].id;
    store.seeds().add(seed(basil_id, "Basil")).unwrap();

    let plant_csv = plants_to_csv(&plants);
    assert_eq!(plant_csv.lines().count(), plants.len() + 1);
    assert!(plant_csv.contains("\"tomato; Unobtainium\""));

    let seed_csv = seeds_to_csv(&store.seeds().list().unwrap());
    let rows: Vec<_> = seed_csv.lines().collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("\"Plant Name\""));
    assert!(rows[1].contains("\"2024-02-01\",\"2026-02-01\",\"50\",\"seeds\""));
    assert!(rows[1].ends_with("\"true\",\"\",\"\",\"\",\"false\""));
}
