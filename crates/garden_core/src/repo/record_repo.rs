//! Generic record repository over the per-collection SQLite tables.
//!
//! # Responsibility
//! - Provide add/get/list/update/delete for every stored collection.
//! - Own identity and timestamp assignment; callers only supply data fields.
//! - Run compound deletes (garden -> schedules) in one transaction.
//!
//! # Invariants
//! - Write paths call `RecordData::validate()` before any SQL mutation.
//! - `payload` holds the full record JSON and is the source of truth; the
//!   other columns are projections rewritten on every write.
//! - Read paths reject rows whose payload does not decode or whose id
//!   disagrees with the `id` column.

use crate::db::DbError;
use crate::model::garden::GardenData;
use crate::model::plant::PlantData;
use crate::model::preferences::PreferencesData;
use crate::model::record::{Record, RecordData, RecordId, ValidationError};
use crate::model::schedule::ScheduleData;
use crate::model::seed::SeedData;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row, Transaction, TransactionBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and lookup.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound {
        collection: &'static str,
        id: RecordId,
    },
    /// Persisted row cannot be decoded into its record type.
    InvalidData(String),
    Serialization(serde_json::Error),
    /// A second record was about to be created in a singleton collection.
    SingletonViolation(&'static str),
    /// A singleton collection has no record yet.
    Missing(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => write!(f, "{collection} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Serialization(err) => write!(f, "serialization error: {err}"),
            Self::SingletonViolation(collection) => {
                write!(f, "{collection} already exists; only one record is allowed")
            }
            Self::Missing(collection) => write!(f, "{collection} has not been created yet"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::NotFound { .. }
            | Self::InvalidData(_)
            | Self::SingletonViolation(_)
            | Self::Missing(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Binds a record data type to its table layout.
pub trait Collection: RecordData + Serialize + DeserializeOwned + Clone {
    /// Table name.
    const TABLE: &'static str;
    /// Singular entity name used in errors, logs and import issues.
    const ENTITY: &'static str;
    /// Projection columns written next to `payload`, in `index_values` order.
    const INDEX_COLUMNS: &'static [&'static str];
    /// `ORDER BY` clause for `list`.
    const ORDER_BY: &'static str;
    /// `(table, column)` pairs whose rows are deleted together with a record.
    const CASCADE: &'static [(&'static str, &'static str)] = &[];

    fn index_values(&self) -> Vec<Value>;
}

impl Collection for PlantData {
    const TABLE: &'static str = "plants";
    const ENTITY: &'static str = "plant";
    const INDEX_COLUMNS: &'static [&'static str] = &["name", "category"];
    const ORDER_BY: &'static str = "name COLLATE NOCASE ASC, id ASC";

    fn index_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Text(self.category.as_str().to_string()),
        ]
    }
}

impl Collection for SeedData {
    const TABLE: &'static str = "seed_inventory";
    const ENTITY: &'static str = "seed";
    const INDEX_COLUMNS: &'static [&'static str] = &["plant_id", "plant_name"];
    const ORDER_BY: &'static str = "plant_name COLLATE NOCASE ASC, id ASC";

    fn index_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.plant_id.to_string()),
            Value::Text(self.plant_name.clone()),
        ]
    }
}

impl Collection for GardenData {
    const TABLE: &'static str = "gardens";
    const ENTITY: &'static str = "garden";
    const INDEX_COLUMNS: &'static [&'static str] = &["name", "is_active"];
    const ORDER_BY: &'static str = "name COLLATE NOCASE ASC, id ASC";
    const CASCADE: &'static [(&'static str, &'static str)] = &[("schedules", "garden_id")];

    fn index_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Integer(i64::from(self.is_active)),
        ]
    }
}

impl Collection for ScheduleData {
    const TABLE: &'static str = "schedules";
    const ENTITY: &'static str = "schedule";
    const INDEX_COLUMNS: &'static [&'static str] =
        &["garden_id", "plant_id", "status", "planned_start_date"];
    const ORDER_BY: &'static str = "planned_start_date ASC, id ASC";

    fn index_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.garden_id.to_string()),
            Value::Text(self.plant_id.to_string()),
            Value::Text(self.status.as_str().to_string()),
            Value::Integer(self.planned_start_date.timestamp_millis()),
        ]
    }
}

impl Collection for PreferencesData {
    const TABLE: &'static str = "preferences";
    const ENTITY: &'static str = "preferences";
    const INDEX_COLUMNS: &'static [&'static str] = &[];
    const ORDER_BY: &'static str = "created_at ASC, id ASC";

    fn index_values(&self) -> Vec<Value> {
        Vec::new()
    }
}

/// CRUD contract shared by the keyed collections.
pub trait RecordRepository<T: Collection> {
    /// Stores `data` under a new id with `created_at == updated_at == now`.
    fn add(&self, data: T) -> RepoResult<RecordId>;
    fn get(&self, id: RecordId) -> RepoResult<Option<Record<T>>>;
    /// All records in the collection's natural order.
    fn list(&self) -> RepoResult<Vec<Record<T>>>;
    /// Applies `mutate` to the stored data fields and advances `updated_at`.
    ///
    /// Fields the closure leaves alone keep their stored values; `id` and
    /// `created_at` are out of the closure's reach.
    fn update<F>(&self, id: RecordId, mutate: F) -> RepoResult<Record<T>>
    where
        F: FnOnce(&mut T);
    /// Deletes one record and its cascade children. Absent ids are a no-op.
    fn delete(&self, id: RecordId) -> RepoResult<()>;
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed repository for one collection.
pub struct SqliteRecordRepository<'conn, T> {
    conn: &'conn Connection,
    _collection: PhantomData<T>,
}

impl<'conn, T: Collection> SqliteRecordRepository<'conn, T> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _collection: PhantomData,
        }
    }

    fn list_where(&self, clause: &str, value: Value) -> RepoResult<Vec<Record<T>>> {
        let sql = format!(
            "SELECT id, payload FROM {} WHERE {clause} ORDER BY {};",
            T::TABLE,
            T::ORDER_BY
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([value])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }
        Ok(records)
    }
}

impl<T: Collection> RecordRepository<T> for SqliteRecordRepository<'_, T> {
    fn add(&self, data: T) -> RepoResult<RecordId> {
        data.validate()?;
        let record = Record::new(data);
        write_record(self.conn, &record, WriteMode::Insert)?;
        debug!(
            "event=record_add module=repo status=ok collection={} id={}",
            T::TABLE,
            record.id
        );
        Ok(record.id)
    }

    fn get(&self, id: RecordId) -> RepoResult<Option<Record<T>>> {
        load_record(self.conn, id)
    }

    fn list(&self) -> RepoResult<Vec<Record<T>>> {
        load_all(self.conn)
    }

    fn update<F>(&self, id: RecordId, mutate: F) -> RepoResult<Record<T>>
    where
        F: FnOnce(&mut T),
    {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut record = load_record::<T>(&tx, id)?.ok_or(RepoError::NotFound {
            collection: T::ENTITY,
            id,
        })?;

        mutate(&mut record.data);
        record.data.validate()?;
        record.touch();
        write_record(&tx, &record, WriteMode::Upsert)?;
        tx.commit()?;

        debug!(
            "event=record_update module=repo status=ok collection={} id={id}",
            T::TABLE
        );
        Ok(record)
    }

    fn delete(&self, id: RecordId) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let id_text = id.to_string();
        let mut cascaded = 0;
        for (table, column) in T::CASCADE {
            cascaded += tx.execute(
                &format!("DELETE FROM {table} WHERE {column} = ?1;"),
                [id_text.as_str()],
            )?;
        }
        let deleted = tx.execute(
            &format!("DELETE FROM {} WHERE id = ?1;", T::TABLE),
            [id_text.as_str()],
        )?;
        tx.commit()?;

        debug!(
            "event=record_delete module=repo status=ok collection={} id={id} deleted={deleted} cascaded={cascaded}",
            T::TABLE
        );
        Ok(())
    }

    fn count(&self) -> RepoResult<u64> {
        count_rows(self.conn, T::TABLE)
    }
}

impl SqliteRecordRepository<'_, SeedData> {
    /// Seed lots whose `plant_id` points at `plant_id`.
    pub fn list_for_plant(&self, plant_id: RecordId) -> RepoResult<Vec<Record<SeedData>>> {
        self.list_where("plant_id = ?1", Value::Text(plant_id.to_string()))
    }
}

impl SqliteRecordRepository<'_, GardenData> {
    /// Gardens flagged `is_active`, by name.
    pub fn list_active(&self) -> RepoResult<Vec<Record<GardenData>>> {
        self.list_where("is_active = ?1", Value::Integer(1))
    }
}

impl SqliteRecordRepository<'_, ScheduleData> {
    pub fn list_for_garden(&self, garden_id: RecordId) -> RepoResult<Vec<Record<ScheduleData>>> {
        self.list_where("garden_id = ?1", Value::Text(garden_id.to_string()))
    }

    pub fn list_for_plant(&self, plant_id: RecordId) -> RepoResult<Vec<Record<ScheduleData>>> {
        self.list_where("plant_id = ?1", Value::Text(plant_id.to_string()))
    }
}

/// Conflict behavior for [`write_record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteMode {
    /// Fails when the id already exists.
    Insert,
    /// Full replace by id.
    Upsert,
}

pub(crate) fn write_record<T: Collection>(
    conn: &Connection,
    record: &Record<T>,
    mode: WriteMode,
) -> RepoResult<()> {
    let verb = match mode {
        WriteMode::Insert => "INSERT",
        WriteMode::Upsert => "INSERT OR REPLACE",
    };
    let mut columns = vec!["id"];
    columns.extend_from_slice(T::INDEX_COLUMNS);
    columns.extend_from_slice(&["payload", "created_at", "updated_at"]);
    let placeholders = (1..=columns.len())
        .map(|index| format!("?{index}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "{verb} INTO {} ({}) VALUES ({placeholders});",
        T::TABLE,
        columns.join(", ")
    );

    let mut values = Vec::with_capacity(columns.len());
    values.push(Value::Text(record.id.to_string()));
    values.extend(record.data.index_values());
    values.push(Value::Text(serde_json::to_string(record)?));
    values.push(Value::Integer(record.created_at.timestamp_millis()));
    values.push(Value::Integer(record.updated_at.timestamp_millis()));

    conn.execute(&sql, params_from_iter(values))?;
    Ok(())
}

pub(crate) fn load_record<T: Collection>(
    conn: &Connection,
    id: RecordId,
) -> RepoResult<Option<Record<T>>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, payload FROM {} WHERE id = ?1;",
        T::TABLE
    ))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_record_row(row)?));
    }
    Ok(None)
}

pub(crate) fn load_all<T: Collection>(conn: &Connection) -> RepoResult<Vec<Record<T>>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, payload FROM {} ORDER BY {};",
        T::TABLE,
        T::ORDER_BY
    ))?;
    let mut rows = stmt.query([])?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        records.push(parse_record_row(row)?);
    }
    Ok(records)
}

pub(crate) fn count_rows(conn: &Connection, table: &str) -> RepoResult<u64> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })?;
    u64::try_from(count).map_err(|_| RepoError::InvalidData(format!("negative count in {table}")))
}

pub(crate) fn parse_record_row<T: Collection>(row: &Row<'_>) -> RepoResult<Record<T>> {
    let id_text: String = row.get("id")?;
    let payload: String = row.get("payload")?;
    let record: Record<T> = serde_json::from_str(&payload).map_err(|err| {
        RepoError::InvalidData(format!(
            "undecodable payload for `{id_text}` in {}.payload: {err}",
            T::TABLE
        ))
    })?;
    if record.id.to_string() != id_text {
        return Err(RepoError::InvalidData(format!(
            "payload id `{}` does not match {}.id `{id_text}`",
            record.id,
            T::TABLE
        )));
    }
    Ok(record)
}
