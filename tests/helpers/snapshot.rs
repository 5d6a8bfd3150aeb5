//! Builders for test snapshots. Each test assembles its own tables.

use pgsnap::catalog::{Column, ColumnKind, DefaultValue, Snapshot, Table};

/// `id serial PRIMARY KEY`
pub fn serial_id() -> Column {
    Column {
        primary_key: true,
        ..Column::new("id", ColumnKind::Serial)
    }
}

/// A column with an array type of the given depth and a default.
pub fn array_column(
    name: &str,
    kind: ColumnKind,
    dimensions: usize,
    default: impl Into<DefaultValue>,
) -> Column {
    Column {
        dimensions,
        default: Some(default.into()),
        ..Column::new(name, kind)
    }
}

pub fn table(name: &str, columns: Vec<Column>) -> Table {
    Table::new("", name, columns)
}

pub fn snapshot(tables: Vec<Table>) -> Snapshot {
    Snapshot::new(tables).expect("test snapshot should be valid")
}

/// `test (id serial primary key)` before, and the same table with `extra`
/// appended after.
pub fn test_table_pair(extra: Column) -> (Snapshot, Snapshot) {
    let from = snapshot(vec![table("test", vec![serial_id()])]);
    let to = snapshot(vec![table("test", vec![serial_id(), extra])]);
    (from, to)
}
