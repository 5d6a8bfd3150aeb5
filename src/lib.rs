//! Schema snapshot diffing for PostgreSQL.
//!
//! Two [`catalog::Snapshot`]s go in, an ordered list of
//! [`diff::operations::ChangeStatement`]s comes out. Column defaults are
//! rendered to PostgreSQL literals along the way.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod render;

pub use catalog::Snapshot;
pub use diff::{ErrorPolicy, SchemaDiff, diff_all, diff_report};
pub use error::DiffError;
