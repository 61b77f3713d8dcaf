//! Preferences repository: the singleton collection.
//!
//! # Responsibility
//! - Read, create and update the one current preferences record.
//! - Provide the replace path used by snapshot import.
//!
//! # Invariants
//! - At most one row exists. The table pins a UNIQUE `singleton` column to 1,
//!   and `create_preferences` checks for an existing row inside the same
//!   immediate transaction as the insert.
//! - `replace_preferences` swaps the current row out atomically.

use crate::model::preferences::{PreferencesData, UserPreferences};
use crate::model::record::{Record, RecordData};
use crate::repo::record_repo::{
    load_all, write_record, Collection, RepoError, RepoResult, WriteMode,
};
use chrono::{Datelike, Utc};
use log::info;
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Repository interface for the preferences singleton.
pub trait PreferencesRepository {
    /// Returns the current record, or `None` before first launch.
    fn get_preferences(&self) -> RepoResult<Option<UserPreferences>>;
    /// Creates the record; fails with `SingletonViolation` when one exists.
    fn create_preferences(&self, data: PreferencesData) -> RepoResult<UserPreferences>;
    /// Returns the current record, creating the first-launch default if absent.
    fn ensure_default_preferences(&self) -> RepoResult<UserPreferences>;
    fn update_preferences<F>(&self, mutate: F) -> RepoResult<UserPreferences>
    where
        F: FnOnce(&mut PreferencesData);
}

/// SQLite-backed preferences repository.
pub struct SqlitePreferencesRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferencesRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn insert_if_absent(&self, data: PreferencesData) -> RepoResult<(UserPreferences, bool)> {
        data.validate()?;
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if let Some(existing) = current_preferences(&tx)? {
            return Ok((existing, false));
        }
        let record = Record::new(data);
        write_record(&tx, &record, WriteMode::Insert)?;
        tx.commit()?;
        Ok((record, true))
    }
}

impl PreferencesRepository for SqlitePreferencesRepository<'_> {
    fn get_preferences(&self) -> RepoResult<Option<UserPreferences>> {
        current_preferences(self.conn)
    }

    fn create_preferences(&self, data: PreferencesData) -> RepoResult<UserPreferences> {
        let (record, created) = self.insert_if_absent(data)?;
        if !created {
            return Err(RepoError::SingletonViolation(PreferencesData::ENTITY));
        }
        Ok(record)
    }

    fn ensure_default_preferences(&self) -> RepoResult<UserPreferences> {
        let defaults = PreferencesData::default_for_year(Utc::now().year());
        let (record, created) = self.insert_if_absent(defaults)?;
        if created {
            info!(
                "event=preferences_default module=repo status=ok id={}",
                record.id
            );
        }
        Ok(record)
    }

    fn update_preferences<F>(&self, mutate: F) -> RepoResult<UserPreferences>
    where
        F: FnOnce(&mut PreferencesData),
    {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut record = current_preferences(&tx)?
            .ok_or(RepoError::Missing(PreferencesData::ENTITY))?;
        mutate(&mut record.data);
        record.data.validate()?;
        record.touch();
        write_record(&tx, &record, WriteMode::Upsert)?;
        tx.commit()?;
        Ok(record)
    }
}

/// First preferences row by creation order.
pub(crate) fn current_preferences(conn: &Connection) -> RepoResult<Option<UserPreferences>> {
    Ok(load_all::<PreferencesData>(conn)?.into_iter().next())
}

/// Makes `record` the current preferences, dropping whichever row held the
/// singleton before. Runs on the caller's connection or transaction.
pub(crate) fn replace_preferences(conn: &Connection, record: &UserPreferences) -> RepoResult<()> {
    record.data.validate()?;
    write_record(conn, record, WriteMode::Upsert)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_db_in_memory;
    use crate::model::preferences::Units;
    use crate::repo::record_repo::count_rows;

    #[test]
    fn second_create_is_a_singleton_violation() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqlitePreferencesRepository::new(&conn);
        repo.create_preferences(PreferencesData::default_for_year(2025))
            .unwrap();

        let err = repo
            .create_preferences(PreferencesData::default_for_year(2026))
            .unwrap_err();
        assert!(matches!(err, RepoError::SingletonViolation("preferences")));
        assert_eq!(count_rows(&conn, "preferences").unwrap(), 1);
    }

    #[test]
    fn ensure_default_is_idempotent() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqlitePreferencesRepository::new(&conn);
        let first = repo.ensure_default_preferences().unwrap();
        let second = repo.ensure_default_preferences().unwrap();
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn replace_swaps_singleton_row() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqlitePreferencesRepository::new(&conn);
        let original = repo.ensure_default_preferences().unwrap();

        let incoming = Record::new(PreferencesData::default_for_year(2030));
        replace_preferences(&conn, &incoming).unwrap();

        let current = repo.get_preferences().unwrap().unwrap();
        assert_eq!(current.id, incoming.id);
        assert_ne!(current.id, original.id);
        assert_eq!(count_rows(&conn, "preferences").unwrap(), 1);
    }

    #[test]
    fn update_without_record_reports_missing() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqlitePreferencesRepository::new(&conn);
        let err = repo
            .update_preferences(|prefs| prefs.units = Units::Metric)
            .unwrap_err();
        assert!(matches!(err, RepoError::Missing("preferences")));
    }

    #[test]
    fn update_changes_fields_and_advances_timestamp() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqlitePreferencesRepository::new(&conn);
        let before = repo.ensure_default_preferences().unwrap();
        let after = repo
            .update_preferences(|prefs| prefs.units = Units::Metric)
            .unwrap();
        assert_eq!(after.data.units, Units::Metric);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
    }
}
