//! Shared SQL rendering for CREATE TABLE statements and column definitions

use super::constraint::{render_primary_key, render_unique};
use crate::catalog::table::ColumnDefinition;
use crate::diff::operations::CreateTable;
use crate::render::quote_ident;

/// Render one column definition: name, type, inline primary key, default
/// and NOT NULL, in that order.
pub fn render_column_definition(column: &ColumnDefinition) -> String {
    let mut def = format!("{} {}", quote_ident(&column.name), column.data_type);

    if column.primary_key {
        def.push_str(" PRIMARY KEY");
    }

    if let Some(ref default) = column.default {
        def.push_str(&format!(" DEFAULT {}", default));
    }

    if column.not_null {
        def.push_str(" NOT NULL");
    }

    def
}

/// Render a complete CREATE TABLE statement.
///
/// Columns come first in declaration order, followed by the composite
/// primary key and unique constraints. Foreign keys are separate statements
/// so that tables can be created in any order.
pub fn render_create_table(create: &CreateTable) -> String {
    let mut sql = String::new();

    sql.push_str("CREATE TABLE ");
    sql.push_str(&create.table.identifier());
    sql.push_str(" (\n");

    let mut definitions: Vec<String> = create
        .columns
        .iter()
        .map(|column| format!("    {}", render_column_definition(column)))
        .collect();

    if let Some(ref pk) = create.composite_pk {
        definitions.push(format!("    {}", render_primary_key(pk)));
    }

    for unique in &create.unique_constraints {
        definitions.push(format!("    {}", render_unique(unique)));
    }

    sql.push_str(&definitions.join(",\n"));
    sql.push_str("\n);");

    sql
}
