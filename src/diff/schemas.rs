//! Diff schemas: CREATE any new, DROP any no longer used by a table

use crate::catalog::{DEFAULT_SCHEMA, Snapshot};
use crate::diff::operations::{ChangeStatement, SchemaTarget};

pub fn diff(old: Option<&String>, new: Option<&String>) -> Vec<ChangeStatement> {
    match (old, new) {
        (None, Some(n)) if n != DEFAULT_SCHEMA => {
            vec![ChangeStatement::CreateSchema(SchemaTarget { name: n.clone() })]
        }
        (Some(o), None) if o != DEFAULT_SCHEMA => {
            vec![ChangeStatement::DropSchema(SchemaTarget { name: o.clone() })]
        }
        _ => Vec::new(),
    }
}

/// Schema statements for every namespace used by tables in only one of the
/// two snapshots.
pub fn diff_all(old: &Snapshot, new: &Snapshot) -> Vec<ChangeStatement> {
    let old_schemas: Vec<String> = old.schemas().into_iter().collect();
    let new_schemas: Vec<String> = new.schemas().into_iter().collect();
    super::diff_list(&old_schemas, &new_schemas, String::clone, diff)
}
