//! Shared SQL rendering functions
//!
//! Column and constraint clauses are rendered here once and reused by both
//! CREATE TABLE and the ALTER TABLE statements, so a column added later reads
//! exactly like one created with its table.

pub mod constraint;
pub mod table;

pub use constraint::{render_foreign_key, render_unique};
pub use table::{render_column_definition, render_create_table};
