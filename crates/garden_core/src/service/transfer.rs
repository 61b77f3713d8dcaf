//! Snapshot export/import, backup/restore and bulk clear.
//!
//! # Responsibility
//! - Serialize every collection into one versioned snapshot document.
//! - Import a snapshot record by record, collecting per-record failures
//!   instead of aborting.
//! - Wipe all collections atomically.
//!
//! # Invariants
//! - Export reads all collections inside one read transaction.
//! - The snapshot shape (version, export date, four arrays) is checked before
//!   any write; a bad shape writes nothing.
//! - Import runs in one immediate transaction. Each record is written inside
//!   its own savepoint, so a failed record leaves no partial row behind.
//! - Import order is plants, seeds, gardens, schedules, preferences. Records
//!   are upserted by id; dangling references are kept as-is.
//! - A transaction-level failure rolls everything back and reports zero
//!   imported records.

use crate::model::garden::{Garden, GardenData};
use crate::model::plant::{Plant, PlantData};
use crate::model::preferences::{PreferencesData, UserPreferences};
use crate::model::record::Record;
use crate::model::schedule::{PlantingSchedule, ScheduleData};
use crate::model::seed::{SeedData, SeedInventory};
use crate::repo::preferences_repo::{current_preferences, replace_preferences};
use crate::repo::record_repo::{
    count_rows, load_all, write_record, Collection, RepoError, RepoResult, WriteMode,
};
use crate::service::views::CollectionCounts;
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Format version written into every exported snapshot.
pub const SNAPSHOT_VERSION: &str = "1.0.0";

const SNAPSHOT_ARRAYS: [&str; 4] = ["plants", "seedInventory", "gardens", "schedules"];

/// Full export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub gardens: Vec<Garden>,
    pub plants: Vec<Plant>,
    pub seed_inventory: Vec<SeedInventory>,
    pub schedules: Vec<PlantingSchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
}

/// Reason a snapshot document was rejected before import.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotShapeError {
    NotAnObject,
    MissingField(&'static str),
    InvalidField {
        field: &'static str,
        message: String,
    },
}

impl Display for SnapshotShapeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "invalid data format: snapshot is not an object"),
            Self::MissingField(field) => write!(f, "invalid data format: missing `{field}`"),
            Self::InvalidField { field, message } => {
                write!(f, "invalid data format: `{field}` {message}")
            }
        }
    }
}

impl Error for SnapshotShapeError {}

/// Whole-import failure, reported as a single `general` issue.
#[derive(Debug)]
pub enum ImportError {
    /// Input text is not JSON.
    Serialization(serde_json::Error),
    Shape(SnapshotShapeError),
    /// Transaction could not be opened, savepointed or committed.
    Repo(RepoError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialization(err) => write!(f, "snapshot is not valid JSON: {err}"),
            Self::Shape(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialization(err) => Some(err),
            Self::Shape(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<SnapshotShapeError> for ImportError {
    fn from(value: SnapshotShapeError) -> Self {
        Self::Shape(value)
    }
}

impl From<RepoError> for ImportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for ImportError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}

/// Category of an import issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportIssueKind {
    Plant,
    Seed,
    Garden,
    Schedule,
    Preferences,
    General,
}

/// One failure carried in an [`ImportResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportIssue {
    #[serde(rename = "type")]
    pub kind: ImportIssueKind,
    pub message: String,
    /// Offending record payload, for record-level issues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedCounts {
    pub gardens: u64,
    pub plants: u64,
    pub seeds: u64,
    pub schedules: u64,
}

/// Outcome of a snapshot import.
///
/// `success` is true whenever the transaction committed, even if some
/// records were skipped; those show up in `errors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    pub success: bool,
    pub message: String,
    pub imported: ImportedCounts,
    pub errors: Vec<ImportIssue>,
}

impl ImportResult {
    fn failed(err: &ImportError) -> Self {
        Self {
            success: false,
            message: format!("Import failed: {err}"),
            imported: ImportedCounts::default(),
            errors: vec![ImportIssue {
                kind: ImportIssueKind::General,
                message: err.to_string(),
                data: None,
            }],
        }
    }
}

/// Snapshot arrays borrowed out of a shape-checked document.
struct SnapshotEnvelope<'a> {
    plants: &'a [Value],
    seed_inventory: &'a [Value],
    gardens: &'a [Value],
    schedules: &'a [Value],
    preferences: Option<&'a Value>,
}

impl<'a> SnapshotEnvelope<'a> {
    fn parse(document: &'a Value) -> Result<Self, SnapshotShapeError> {
        let object = document.as_object().ok_or(SnapshotShapeError::NotAnObject)?;

        match object.get("version") {
            None | Some(Value::Null) => return Err(SnapshotShapeError::MissingField("version")),
            Some(Value::String(version)) if !version.trim().is_empty() => {}
            Some(_) => {
                return Err(SnapshotShapeError::InvalidField {
                    field: "version",
                    message: "must be a non-empty string".to_string(),
                })
            }
        }

        match object.get("exportDate") {
            None | Some(Value::Null) => {
                return Err(SnapshotShapeError::MissingField("exportDate"))
            }
            Some(Value::String(date)) => {
                DateTime::parse_from_rfc3339(date).map_err(|err| {
                    SnapshotShapeError::InvalidField {
                        field: "exportDate",
                        message: format!("is not an ISO-8601 timestamp: {err}"),
                    }
                })?;
            }
            Some(_) => {
                return Err(SnapshotShapeError::InvalidField {
                    field: "exportDate",
                    message: "must be an ISO-8601 timestamp string".to_string(),
                })
            }
        }

        let mut arrays: [&'a [Value]; 4] = [&[]; 4];
        for (slot, field) in arrays.iter_mut().zip(SNAPSHOT_ARRAYS) {
            *slot = match object.get(field) {
                None | Some(Value::Null) => return Err(SnapshotShapeError::MissingField(field)),
                Some(Value::Array(items)) => items.as_slice(),
                Some(_) => {
                    return Err(SnapshotShapeError::InvalidField {
                        field,
                        message: "must be an array".to_string(),
                    })
                }
            };
        }
        let [plants, seed_inventory, gardens, schedules] = arrays;

        Ok(Self {
            plants,
            seed_inventory,
            gardens,
            schedules,
            preferences: object.get("preferences").filter(|value| !value.is_null()),
        })
    }
}

/// Snapshot and bulk-data operations over one connection.
pub struct TransferService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> TransferService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// Reads every collection into a snapshot stamped with the current time.
    pub fn export_snapshot(&self) -> RepoResult<Snapshot> {
        let started_at = Instant::now();
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Deferred)?;
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION.to_string(),
            export_date: Utc::now(),
            gardens: load_all(&tx)?,
            plants: load_all(&tx)?,
            seed_inventory: load_all(&tx)?,
            schedules: load_all(&tx)?,
            preferences: current_preferences(&tx)?,
        };
        tx.commit()?;

        info!(
            "event=snapshot_export module=transfer status=ok duration_ms={} plants={} seeds={} gardens={} schedules={} preferences={}",
            started_at.elapsed().as_millis(),
            snapshot.plants.len(),
            snapshot.seed_inventory.len(),
            snapshot.gardens.len(),
            snapshot.schedules.len(),
            snapshot.preferences.is_some()
        );
        Ok(snapshot)
    }

    /// Pretty-printed snapshot JSON.
    pub fn export_json(&self) -> RepoResult<String> {
        Ok(serde_json::to_string_pretty(&self.export_snapshot()?)?)
    }

    /// Pretty-printed snapshot JSON; preferences are left out unless
    /// `include_settings` is set.
    pub fn create_backup(&self, include_settings: bool) -> RepoResult<String> {
        let mut snapshot = self.export_snapshot()?;
        if !include_settings {
            snapshot.preferences = None;
        }
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Parses `text` and imports it. Never fails; problems are reported in
    /// the returned result.
    pub fn import_json(&mut self, text: &str) -> ImportResult {
        match serde_json::from_str::<Value>(text) {
            Ok(document) => self.import_snapshot(&document),
            Err(err) => {
                let err = ImportError::Serialization(err);
                warn!("event=snapshot_import module=transfer status=error error_code=not_json error={err}");
                ImportResult::failed(&err)
            }
        }
    }

    /// Imports a parsed snapshot document.
    pub fn import_snapshot(&mut self, document: &Value) -> ImportResult {
        let started_at = Instant::now();
        info!("event=snapshot_import module=transfer status=start");

        let outcome = SnapshotEnvelope::parse(document)
            .map_err(ImportError::from)
            .and_then(|envelope| self.import_envelope(&envelope));

        match outcome {
            Ok((imported, errors)) => {
                info!(
                    "event=snapshot_import module=transfer status=ok duration_ms={} plants={} seeds={} gardens={} schedules={} record_errors={}",
                    started_at.elapsed().as_millis(),
                    imported.plants,
                    imported.seeds,
                    imported.gardens,
                    imported.schedules,
                    errors.len()
                );
                ImportResult {
                    success: true,
                    message: format!(
                        "Successfully imported {} plants, {} seeds, {} gardens, and {} schedules",
                        imported.plants, imported.seeds, imported.gardens, imported.schedules
                    ),
                    imported,
                    errors,
                }
            }
            Err(err) => {
                let error_code = match err {
                    ImportError::Shape(_) => "invalid_shape",
                    ImportError::Serialization(_) => "not_json",
                    ImportError::Repo(_) => "transaction_failed",
                };
                error!(
                    "event=snapshot_import module=transfer status=error duration_ms={} error_code={error_code} error={err}",
                    started_at.elapsed().as_millis()
                );
                ImportResult::failed(&err)
            }
        }
    }

    /// Optionally clears every collection, then imports `text`.
    ///
    /// The clear commits on its own, so a failed import after a clear leaves
    /// the store empty.
    pub fn restore_from_backup(
        &mut self,
        text: &str,
        clear_existing: bool,
    ) -> RepoResult<ImportResult> {
        if clear_existing {
            self.clear_all_data()?;
        }
        Ok(self.import_json(text))
    }

    /// Deletes every row of every collection in one transaction.
    pub fn clear_all_data(&mut self) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut deleted = 0;
        for table in [
            PlantData::TABLE,
            SeedData::TABLE,
            GardenData::TABLE,
            ScheduleData::TABLE,
            PreferencesData::TABLE,
        ] {
            deleted += tx.execute(&format!("DELETE FROM {table};"), [])?;
        }
        tx.commit()?;
        info!("event=data_clear module=transfer status=ok deleted={deleted}");
        Ok(())
    }

    pub fn stats(&self) -> RepoResult<CollectionCounts> {
        Ok(CollectionCounts {
            plants: count_rows(self.conn, PlantData::TABLE)?,
            seeds: count_rows(self.conn, SeedData::TABLE)?,
            gardens: count_rows(self.conn, GardenData::TABLE)?,
            schedules: count_rows(self.conn, ScheduleData::TABLE)?,
        })
    }

    fn import_envelope(
        &mut self,
        envelope: &SnapshotEnvelope<'_>,
    ) -> Result<(ImportedCounts, Vec<ImportIssue>), ImportError> {
        let mut imported = ImportedCounts::default();
        let mut errors = Vec::new();
        let mut tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        imported.plants = import_items::<PlantData>(
            &mut tx,
            envelope.plants,
            ImportIssueKind::Plant,
            Some("name"),
            &mut errors,
        )?;
        imported.seeds = import_items::<SeedData>(
            &mut tx,
            envelope.seed_inventory,
            ImportIssueKind::Seed,
            Some("plantName"),
            &mut errors,
        )?;
        imported.gardens = import_items::<GardenData>(
            &mut tx,
            envelope.gardens,
            ImportIssueKind::Garden,
            Some("name"),
            &mut errors,
        )?;
        imported.schedules = import_items::<ScheduleData>(
            &mut tx,
            envelope.schedules,
            ImportIssueKind::Schedule,
            None,
            &mut errors,
        )?;
        if let Some(preferences) = envelope.preferences {
            let sp = tx.savepoint()?;
            match decode_record::<PreferencesData>(preferences)
                .and_then(|record| replace_preferences(&sp, &record))
            {
                Ok(()) => sp.commit()?,
                Err(err) => errors.push(record_issue(
                    ImportIssueKind::Preferences,
                    "preferences".to_string(),
                    &err,
                    preferences,
                )),
            }
        }

        tx.commit()?;
        Ok((imported, errors))
    }
}

/// Upserts each item inside its own savepoint and returns how many stuck.
///
/// Record failures are pushed to `errors`; savepoint and commit failures
/// abort the whole import.
fn import_items<T: Collection>(
    tx: &mut Transaction<'_>,
    items: &[Value],
    kind: ImportIssueKind,
    label_field: Option<&str>,
    errors: &mut Vec<ImportIssue>,
) -> Result<u64, ImportError> {
    let mut imported = 0;
    for item in items {
        let sp = tx.savepoint()?;
        match decode_record::<T>(item)
            .and_then(|record| write_record(&sp, &record, WriteMode::Upsert))
        {
            Ok(()) => {
                sp.commit()?;
                imported += 1;
            }
            Err(err) => {
                let label = match label_field
                    .and_then(|field| item.get(field))
                    .and_then(Value::as_str)
                {
                    Some(name) => format!("{} `{name}`", T::ENTITY),
                    None => T::ENTITY.to_string(),
                };
                errors.push(record_issue(kind, label, &err, item));
            }
        }
    }
    Ok(imported)
}

fn decode_record<T: Collection>(item: &Value) -> RepoResult<Record<T>> {
    let record: Record<T> = serde_json::from_value(item.clone())?;
    record.data.validate()?;
    Ok(record)
}

fn record_issue(kind: ImportIssueKind, label: String, err: &RepoError, item: &Value) -> ImportIssue {
    warn!(
        "event=snapshot_import_record module=transfer status=error kind={kind:?} error={err}"
    );
    ImportIssue {
        kind,
        message: format!("Failed to import {label}: {err}"),
        data: Some(item.clone()),
    }
}
