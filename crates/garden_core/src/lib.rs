//! Core domain logic for the garden planner.
//! This crate owns the local entity store, plant search and snapshot transfer.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::garden::{Garden, GardenData};
pub use model::plant::{Plant, PlantCategory, PlantData};
pub use model::preferences::{PreferencesData, UserPreferences};
pub use model::record::{Record, RecordData, RecordId, ValidationError};
pub use model::schedule::{PlantingSchedule, ScheduleData};
pub use model::seed::{SeedData, SeedInventory};
pub use repo::preferences_repo::{PreferencesRepository, SqlitePreferencesRepository};
pub use repo::record_repo::{RecordRepository, RepoError, RepoResult, SqliteRecordRepository};
pub use search::filter::{filter_plants, Bounds, PlantFilter};
pub use search::stored::search_plants;
pub use service::store::GardenStore;
pub use service::transfer::{
    ImportIssue, ImportIssueKind, ImportResult, ImportedCounts, Snapshot, TransferService,
    SNAPSHOT_VERSION,
};
pub use service::views::CollectionCounts;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
