//! SQL-backed plant search over the stored collection.
//!
//! # Responsibility
//! - Answer the common catalog query without loading every plant.
//!
//! # Invariants
//! - Text matches name, variety or scientific name only. Description is
//!   searched by [`super::filter::filter_plants`] alone. Text is not
//!   trimmed; blank text adds no constraint.
//! - Only category, difficulty, sun requirement and days-to-maturity
//!   predicates are pushed into SQL; the rest of [`PlantFilter`] is ignored.
//! - Results are ordered by name, ties by id.
//! - Case folding uses SQLite `lower()`, which only folds ASCII.

use super::filter::PlantFilter;
use crate::model::plant::{Plant, PlantData};
use crate::repo::record_repo::{parse_record_row, Collection, RepoResult};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

/// Searches stored plants by text and the SQL-supported subset of `filter`.
pub fn search_plants(conn: &Connection, text: &str, filter: &PlantFilter) -> RepoResult<Vec<Plant>> {
    let mut sql = format!("SELECT id, payload FROM {} WHERE 1 = 1", PlantData::TABLE);
    let mut bind_values: Vec<Value> = Vec::new();

    if !text.trim().is_empty() {
        sql.push_str(
            " AND (instr(lower(name), ?1) > 0
                OR instr(lower(COALESCE(json_extract(payload, '$.variety'), '')), ?1) > 0
                OR instr(lower(COALESCE(json_extract(payload, '$.scientificName'), '')), ?1) > 0)",
        );
        bind_values.push(Value::Text(text.to_lowercase()));
    }

    push_in_clause(
        &mut sql,
        &mut bind_values,
        "category",
        filter.category.iter().map(|value| value.as_str()),
    );
    push_in_clause(
        &mut sql,
        &mut bind_values,
        "json_extract(payload, '$.difficultyLevel')",
        filter.difficulty_level.iter().map(|value| value.as_str()),
    );
    push_in_clause(
        &mut sql,
        &mut bind_values,
        "json_extract(payload, '$.sunRequirement')",
        filter.sun_requirement.iter().map(|value| value.as_str()),
    );

    if let Some(min) = filter.days_to_maturity.min {
        bind_values.push(Value::Integer(i64::from(min)));
        sql.push_str(&format!(
            " AND json_extract(payload, '$.daysToMaturity') >= ?{}",
            bind_values.len()
        ));
    }
    if let Some(max) = filter.days_to_maturity.max {
        bind_values.push(Value::Integer(i64::from(max)));
        sql.push_str(&format!(
            " AND json_extract(payload, '$.daysToMaturity') <= ?{}",
            bind_values.len()
        ));
    }

    sql.push_str(&format!(" ORDER BY {};", PlantData::ORDER_BY));

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut plants = Vec::new();
    while let Some(row) = rows.next()? {
        plants.push(parse_record_row(row)?);
    }

    debug!(
        "event=plant_search module=search status=ok hits={}",
        plants.len()
    );
    Ok(plants)
}

/// Appends `AND <column> IN (...)` when `values` is non-empty.
fn push_in_clause<'a>(
    sql: &mut String,
    bind_values: &mut Vec<Value>,
    column: &str,
    values: impl Iterator<Item = &'a str>,
) {
    let mut placeholders = Vec::new();
    for value in values {
        bind_values.push(Value::Text(value.to_string()));
        placeholders.push(format!("?{}", bind_values.len()));
    }
    if placeholders.is_empty() {
        return;
    }
    sql.push_str(&format!(" AND {column} IN ({})", placeholders.join(", ")));
}
