use tracing::{debug, warn};

use crate::catalog::table::{Column, Table};
use crate::diff::operations::{ChangeStatement, CreateReference, CreateTable, TableTarget};
use crate::diff::{SchemaDiff, columns, constraints};
use crate::error::DiffError;

pub fn diff(old: Option<&Table>, new: Option<&Table>) -> SchemaDiff {
    match (old, new) {
        (None, Some(n)) => create(n),
        (Some(o), None) => SchemaDiff::from_statements(vec![ChangeStatement::DropTable(
            TableTarget::new(&o.schema, &o.name),
        )]),
        (Some(o), Some(n)) => alter(o, n),
        (None, None) => SchemaDiff::default(),
    }
}

/// A new table is created whole. If any column cannot be materialized the
/// table and its references are skipped together.
fn create(table: &Table) -> SchemaDiff {
    let target = TableTarget::new(&table.schema, &table.name);

    let columns: Result<Vec<_>, DiffError> = table
        .columns
        .iter()
        .map(|c| {
            c.definition()
                .map_err(|e| e.in_column(table.qualified_name(), &c.name))
        })
        .collect();

    let columns = match columns {
        Ok(columns) => columns,
        Err(e) => {
            warn!("Skipping creation of table {}: {}", table.qualified_name(), e);
            return SchemaDiff::from_skipped(e);
        }
    };

    let mut statements = vec![ChangeStatement::CreateTable(CreateTable {
        table: target.clone(),
        columns,
        composite_pk: table.primary_key.clone(),
        unique_constraints: table.unique_constraints.clone(),
    })];

    statements.extend(table.foreign_keys.iter().map(|fk| {
        ChangeStatement::CreateReference(CreateReference {
            table: target.clone(),
            foreign_key: fk.clone(),
        })
    }));

    SchemaDiff::from_statements(statements)
}

fn alter(old: &Table, new: &Table) -> SchemaDiff {
    debug!("Diffing table {}", new.qualified_name());

    let target = TableTarget::new(&new.schema, &new.name);
    let constraint_changes = constraints::diff_all(&target, old, new);
    let mut report = SchemaDiff::from_statements(constraint_changes.removals);

    // additions and alterations follow the new column order
    for column in &new.columns {
        record_column(&mut report, new, &target, old.column(&column.name), Some(column));
    }

    // drops follow the old column order
    for column in &old.columns {
        if new.column(&column.name).is_none() {
            record_column(&mut report, old, &target, Some(column), None);
        }
    }

    for notice in ambiguous_renames(old, new) {
        warn!("{}", notice);
        report.notices.push(notice);
    }

    report.statements.extend(constraint_changes.creations);
    report
}

fn record_column(
    report: &mut SchemaDiff,
    table: &Table,
    target: &TableTarget,
    old: Option<&Column>,
    new: Option<&Column>,
) {
    match columns::diff(target, old, new) {
        Ok(statements) => report.statements.extend(statements),
        Err(e) => {
            let name = new.or(old).map(|c| c.name.as_str()).unwrap_or_default();
            let e = e.in_column(table.qualified_name(), name);
            warn!("Skipping column change: {}", e);
            report.skipped.push(e);
        }
    }
}

/// Dropped and added columns of different types that sit at the same
/// ordinal position. These may be renames with a type change; they are still
/// diffed as drop + add. A same-type swap is an ordinary drop + add.
fn ambiguous_renames(old: &Table, new: &Table) -> Vec<DiffError> {
    old.columns
        .iter()
        .enumerate()
        .filter(|(_, c)| new.column(&c.name).is_none())
        .filter_map(|(position, dropped)| {
            let added = new.columns.get(position)?;
            if old.column(&added.name).is_some() || added.data_type() == dropped.data_type() {
                return None;
            }
            Some(DiffError::AmbiguousRename {
                table: new.qualified_name(),
                dropped: dropped.name.clone(),
                dropped_type: dropped.data_type(),
                added: added.name.clone(),
                added_type: added.data_type(),
            })
        })
        .collect()
}
