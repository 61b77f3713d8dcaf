//! Garden store facade.
//!
//! # Responsibility
//! - Own the single SQLite connection for one garden database.
//! - Hand out per-collection repositories, search and transfer services.
//!
//! # Invariants
//! - Repositories borrow the store; transfer operations borrow it mutably,
//!   so no repository is alive while an import or clear runs.
//! - There is no global instance; callers open and close stores explicitly.

use crate::db::{open_db, open_db_in_memory, DbError, DbResult};
use crate::model::garden::GardenData;
use crate::model::plant::{Plant, PlantData};
use crate::model::schedule::ScheduleData;
use crate::model::seed::SeedData;
use crate::repo::preferences_repo::SqlitePreferencesRepository;
use crate::repo::record_repo::{RepoResult, SqliteRecordRepository};
use crate::search::filter::PlantFilter;
use crate::search::stored::search_plants;
use crate::service::transfer::TransferService;
use log::info;
use rusqlite::Connection;
use std::path::Path;

/// One open garden database.
pub struct GardenStore {
    conn: Connection,
}

impl GardenStore {
    /// Opens or creates the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn plants(&self) -> SqliteRecordRepository<'_, PlantData> {
        SqliteRecordRepository::new(&self.conn)
    }

    pub fn seeds(&self) -> SqliteRecordRepository<'_, SeedData> {
        SqliteRecordRepository::new(&self.conn)
    }

    pub fn gardens(&self) -> SqliteRecordRepository<'_, GardenData> {
        SqliteRecordRepository::new(&self.conn)
    }

    pub fn schedules(&self) -> SqliteRecordRepository<'_, ScheduleData> {
        SqliteRecordRepository::new(&self.conn)
    }

    pub fn preferences(&self) -> SqlitePreferencesRepository<'_> {
        SqlitePreferencesRepository::new(&self.conn)
    }

    /// Export, import, backup, restore, clear and stats.
    pub fn transfer(&mut self) -> TransferService<'_> {
        TransferService::new(&mut self.conn)
    }

    /// Stored-collection plant search, ordered by name.
    pub fn search_plants(&self, text: &str, filter: &PlantFilter) -> RepoResult<Vec<Plant>> {
        search_plants(&self.conn, text, filter)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> DbResult<()> {
        self.conn.close().map_err(|(_, err)| DbError::Sqlite(err))?;
        info!("event=store_close module=service status=ok");
        Ok(())
    }
}
