//! Repository layer: SQLite persistence for the garden collections.
//!
//! # Responsibility
//! - Define collection-level data access contracts.
//! - Keep SQL, payload encoding and transactions out of the service layer.
//!
//! # Invariants
//! - Repository writes run `RecordData::validate()` before persistence.
//! - Semantic errors (`NotFound`, `SingletonViolation`) are reported next to
//!   transport errors, never folded into them.

pub mod preferences_repo;
pub mod record_repo;
