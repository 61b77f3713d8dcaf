//! Garden planner domain model.
//!
//! # Responsibility
//! - Define the five stored collections and their embedded value objects.
//! - Keep write-time invariants next to the data they guard.
//!
//! # Invariants
//! - Every stored entity is a [`record::Record`]; identity and timestamps are
//!   owned by the store, data fields by the caller.
//! - Cross-collection references (`plant_id`, `garden_id`) are soft and may
//!   dangle.

pub mod garden;
pub mod plant;
pub mod preferences;
pub mod record;
pub mod schedule;
pub mod seed;
