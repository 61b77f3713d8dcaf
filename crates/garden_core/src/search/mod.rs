//! Plant search entry points.
//!
//! # Responsibility
//! - `filter`: pure predicate engine over loaded plants.
//! - `stored`: SQL query over the plants table for the common case.

pub mod filter;
pub mod stored;
