mod common;

use common::{garden, plant, schedule, seed};
use garden_core::model::preferences::Units;
use garden_core::{
    GardenStore, PreferencesRepository, RecordId, RecordRepository, RepoError, ValidationError,
};

#[test]
fn plant_add_then_get_round_trips_data_fields() {
    let store = GardenStore::open_in_memory().unwrap();
    let mut data = plant("Tomato", "nightshade", 75);
    data.scientific_name = Some("Solanum lycopersicum".to_string());
    data.companion_plants = vec!["Basil".to_string()];
    data.successive_planting_interval = Some(14);

    let id = store.plants().add(data.clone()).unwrap();
    let stored = store.plants().get(id).unwrap().unwrap();

    assert_eq!(stored.id, id);
    assert_eq!(stored.data, data);
    assert_eq!(stored.created_at, stored.updated_at);
}

#[test]
fn get_unknown_id_is_absent() {
    let store = GardenStore::open_in_memory().unwrap();
    assert!(store.plants().get(RecordId::new_v4()).unwrap().is_none());
}

#[test]
fn update_keeps_identity_and_advances_updated_at() {
    let store = GardenStore::open_in_memory().unwrap();
    let id = store.plants().add(plant("Basil", "herb", 60)).unwrap();
    let before = store.plants().get(id).unwrap().unwrap();

    let after = store
        .plants()
        .update(id, |data| data.variety = "Genovese".to_string())
        .unwrap();

    assert_eq!(after.id, before.id);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
    assert_eq!(after.data.variety, "Genovese");
    assert_eq!(after.data.days_to_maturity, 60);
    assert_eq!(store.plants().get(id).unwrap().unwrap(), after);
}

#[test]
fn repeated_updates_strictly_advance_updated_at() {
    let store = GardenStore::open_in_memory().unwrap();
    let id = store.gardens().add(garden("Front")).unwrap();
    let mut last = store.gardens().get(id).unwrap().unwrap().updated_at;
    for _ in 0..5 {
        let next = store
            .gardens()
            .update(id, |data| data.is_active = !data.is_active)
            .unwrap();
        assert!(next.updated_at > last);
        last = next.updated_at;
    }
}

#[test]
fn update_missing_record_reports_not_found() {
    let store = GardenStore::open_in_memory().unwrap();
    let missing = RecordId::new_v4();
    let err = store
        .seeds()
        .update(missing, |data| data.quantity = 1.0)
        .unwrap_err();
    match err {
        RepoError::NotFound { collection, id } => {
            assert_eq!(collection, "seed");
            assert_eq!(id, missing);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_data_is_rejected_without_writing() {
    let store = GardenStore::open_in_memory().unwrap();
    let err = store.plants().add(plant("  ", "herb", 60)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyField("name"))
    ));
    assert_eq!(store.plants().count().unwrap(), 0);

    let id = store.plants().add(plant("Basil", "herb", 60)).unwrap();
    let err = store
        .plants()
        .update(id, |data| {
            data.soil_ph.min = 8.0;
            data.soil_ph.max = 5.0;
        })
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(store.plants().get(id).unwrap().unwrap().data.soil_ph.min, 6.0);
}

#[test]
fn list_orders_plants_by_name_ignoring_case() {
    let store = GardenStore::open_in_memory().unwrap();
    for name in ["tomato", "Basil", "kale"] {
        store.plants().add(plant(name, "vegetable", 50)).unwrap();
    }
    let names: Vec<_> = store
        .plants()
        .list()
        .unwrap()
        .into_iter()
        .map(|plant| plant.data.name)
        .collect();
    assert_eq!(names, vec!["Basil", "kale", "tomato"]);
}

#[test]
fn deleting_garden_removes_its_schedules() {
    let store = GardenStore::open_in_memory().unwrap();
    let plant_id = store.plants().add(plant("Basil", "herb", 60)).unwrap();
    let doomed = store.gardens().add(garden("Front")).unwrap();
    let kept = store.gardens().add(garden("Back")).unwrap();
    store.schedules().add(schedule(doomed, plant_id)).unwrap();
    store.schedules().add(schedule(doomed, plant_id)).unwrap();
    let survivor = store.schedules().add(schedule(kept, plant_id)).unwrap();

    store.gardens().delete(doomed).unwrap();

    assert!(store.gardens().get(doomed).unwrap().is_none());
    assert!(store.schedules().list_for_garden(doomed).unwrap().is_empty());
    let remaining = store.schedules().list().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, survivor);
}

#[test]
fn failed_garden_delete_keeps_its_schedules() {
    let store = GardenStore::open_in_memory().unwrap();
    let plant_id = store.plants().add(plant("Basil", "herb", 60)).unwrap();
    let front = store.gardens().add(garden("Front")).unwrap();
    store.schedules().add(schedule(front, plant_id)).unwrap();
    store.schedules().add(schedule(front, plant_id)).unwrap();
    store
        .connection()
        .execute_batch(
            "CREATE TRIGGER block_garden_delete BEFORE DELETE ON gardens
             BEGIN SELECT RAISE(ABORT, 'garden delete blocked'); END;",
        )
        .unwrap();

    assert!(matches!(
        store.gardens().delete(front),
        Err(RepoError::Db(_))
    ));

    assert!(store.gardens().get(front).unwrap().is_some());
    assert_eq!(store.schedules().list_for_garden(front).unwrap().len(), 2);
}

#[test]
fn delete_is_idempotent() {
    let store = GardenStore::open_in_memory().unwrap();
    let id = store.plants().add(plant("Basil", "herb", 60)).unwrap();
    store.plants().delete(id).unwrap();
    store.plants().delete(id).unwrap();
    store.plants().delete(RecordId::new_v4()).unwrap();
    assert_eq!(store.plants().count().unwrap(), 0);
}

#[test]
fn deleting_plant_leaves_dangling_seed_reference() {
    let store = GardenStore::open_in_memory().unwrap();
    let plant_id = store.plants().add(plant("Basil", "herb", 60)).unwrap();
    let seed_id = store.seeds().add(seed(plant_id, "Basil")).unwrap();

    store.plants().delete(plant_id).unwrap();

    let orphan = store.seeds().get(seed_id).unwrap().unwrap();
    assert_eq!(orphan.data.plant_id, plant_id);
    assert_eq!(store.seeds().list_for_plant(plant_id).unwrap().len(), 1);
}

#[test]
fn preferences_default_is_created_once_and_updatable() {
    let store = GardenStore::open_in_memory().unwrap();
    assert!(store.preferences().get_preferences().unwrap().is_none());

    let created = store.preferences().ensure_default_preferences().unwrap();
    assert_eq!(created.data.location.hardiness_zone, "6a");
    assert_eq!(created.data.units, Units::Imperial);

    let updated = store
        .preferences()
        .update_preferences(|prefs| prefs.location.hardiness_zone = "7b".to_string())
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(
        store
            .preferences()
            .get_preferences()
            .unwrap()
            .unwrap()
            .data
            .location
            .hardiness_zone,
        "7b"
    );
}
