//! Garden store use-case services.
//!
//! # Responsibility
//! - `store`: connection-owning facade handing out repositories.
//! - `transfer`: snapshot export/import, backup/restore, clear, stats.
//! - `views`: pure derived views over loaded collections.
//! - `csv`: tabular export of plants and seeds.

pub mod csv;
pub mod store;
pub mod transfer;
pub mod views;
