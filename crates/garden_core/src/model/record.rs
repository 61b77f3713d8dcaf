//! Stored record envelope shared by every collection.
//!
//! # Responsibility
//! - Pair caller-owned data fields with store-owned identity and timestamps.
//! - Define the validation contract every collection payload implements.
//!
//! # Invariants
//! - `id` and `created_at` never change after the first write.
//! - `updated_at` is only written by the store and is never earlier than
//!   `created_at`.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a stored record in any collection.
pub type RecordId = Uuid;

/// A persisted entity: store-assigned metadata around caller data.
///
/// Serialized flat, so a `Record<PlantData>` has the same JSON shape as the
/// snapshot format (`id`, data fields, `createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<T> {
    pub id: RecordId,
    #[serde(flatten)]
    pub data: T,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<T> Record<T> {
    /// Wraps `data` with a fresh id and `created_at == updated_at == now`.
    pub fn new(data: T) -> Self {
        let now = current_timestamp();
        Self {
            id: Uuid::new_v4(),
            data,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves `updated_at` forward, strictly past its previous value.
    pub fn touch(&mut self) {
        self.updated_at = next_timestamp(self.updated_at);
    }
}

/// Payload contract for stored record data.
pub trait RecordData {
    /// Checks invariants that must hold before the record is written.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Write-time invariant violation for record data.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field is blank after trim.
    EmptyField(&'static str),
    /// A `[min, max]` pair has `min > max`.
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    /// A value is outside its allowed domain.
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "`{field}` must not be empty"),
            Self::InvertedRange { field, min, max } => {
                write!(f, "`{field}` range is inverted: min {min} > max {max}")
            }
            Self::InvalidValue { field, message } => write!(f, "invalid `{field}`: {message}"),
        }
    }
}

impl Error for ValidationError {}

/// Current UTC time truncated to millisecond precision.
///
/// Storage columns keep epoch milliseconds, so sub-millisecond digits are
/// dropped at the source to keep payload and columns in agreement.
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Returns `max(now, previous + 1ms)`.
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = current_timestamp();
    let floor = previous.trunc_subsecs(3) + chrono::Duration::milliseconds(1);
    if now >= floor {
        now
    } else {
        floor
    }
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}
