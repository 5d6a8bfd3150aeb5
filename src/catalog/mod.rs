use crate::catalog::id::{DbObjectId, DependsOn};
use crate::error::DiffError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub mod column_type;
pub mod constraint;
pub mod default_value;
pub mod id;
pub mod table;

pub use column_type::{ColumnKind, canonical_name};
pub use constraint::{ForeignKey, PrimaryKey, ReferentialAction, UniqueConstraint};
pub use default_value::DefaultValue;
pub use table::{Column, ColumnDefinition, Table};

/// The namespace unqualified tables live in. Snapshots spell it `""`.
pub const DEFAULT_SCHEMA: &str = "public";

fn unqualified(schema: &str) -> &str {
    if schema == DEFAULT_SCHEMA { "" } else { schema }
}

/// The complete table schema at one point in time.
///
/// Snapshots are validated on construction (table identities and column
/// names are unique) and are never mutated afterwards; filtering produces a
/// new snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotInput", into = "SnapshotInput")]
pub struct Snapshot {
    tables: Vec<Table>,
    forward_deps: BTreeMap<DbObjectId, Vec<DbObjectId>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotInput {
    #[serde(default)]
    tables: Vec<Table>,
}

impl TryFrom<SnapshotInput> for Snapshot {
    type Error = DiffError;

    fn try_from(input: SnapshotInput) -> Result<Self, Self::Error> {
        Snapshot::new(input.tables)
    }
}

impl From<Snapshot> for SnapshotInput {
    fn from(snapshot: Snapshot) -> Self {
        SnapshotInput {
            tables: snapshot.tables,
        }
    }
}

impl Snapshot {
    pub fn new(mut tables: Vec<Table>) -> Result<Self, DiffError> {
        for table in &mut tables {
            table.normalize_schema();
        }

        let mut seen = BTreeSet::new();
        for table in &tables {
            if !seen.insert(table.id()) {
                return Err(DiffError::DuplicateTable {
                    table: table.qualified_name(),
                });
            }

            let mut columns = BTreeSet::new();
            for column in &table.columns {
                if !columns.insert(column.name.as_str()) {
                    return Err(DiffError::DuplicateColumn {
                        table: table.qualified_name(),
                        column: column.name.clone(),
                    });
                }
            }
        }

        Ok(Self::from_validated(tables))
    }

    pub fn empty() -> Self {
        Self::from_validated(Vec::new())
    }

    fn from_validated(tables: Vec<Table>) -> Self {
        let forward_deps = tables
            .iter()
            .map(|t| (DependsOn::id(t), t.depends_on()))
            .collect();

        Self {
            tables,
            forward_deps,
        }
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, schema: &str, name: &str) -> Option<&Table> {
        let schema = unqualified(schema);
        self.tables
            .iter()
            .find(|t| t.schema == schema && t.name == name)
    }

    /// Non-default namespaces used by at least one table, in sorted order.
    pub fn schemas(&self) -> BTreeSet<String> {
        self.tables
            .iter()
            .filter(|t| !t.schema.is_empty())
            .map(|t| t.schema.clone())
            .collect()
    }

    /// What must exist before the given object can exist.
    pub fn dependencies_of(&self, id: &DbObjectId) -> &[DbObjectId] {
        self.forward_deps
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains_id(&self, id: &DbObjectId) -> bool {
        match id {
            DbObjectId::Schema { name } => self.tables.iter().any(|t| &t.schema == name),
            DbObjectId::Table { .. } => self.forward_deps.contains_key(id),
            DbObjectId::Column {
                schema,
                table,
                column,
            } => self
                .table(schema, table)
                .is_some_and(|t| t.column(column).is_some()),
            DbObjectId::Constraint {
                schema,
                table,
                name,
            } => self.table(schema, table).is_some_and(|t| {
                t.primary_key.as_ref().is_some_and(|pk| &pk.name == name)
                    || t.unique_constraints.iter().any(|u| &u.name == name)
                    || t.foreign_keys.iter().any(|fk| &fk.name == name)
            }),
        }
    }

    /// A new snapshot holding only the tables accepted by `keep`.
    pub fn retain(&self, mut keep: impl FnMut(&Table) -> bool) -> Snapshot {
        Self::from_validated(self.tables.iter().filter(|t| keep(t)).cloned().collect())
    }
}
