pub mod columns;
pub mod constraints;
pub mod operations;
pub mod schemas;
pub mod tables;

use crate::catalog::id::DbObjectId;
use crate::catalog::{Snapshot, Table};
use crate::diff::operations::{ChangeStatement, SqlRenderer};
use crate::error::DiffError;
use petgraph::Direction;
use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// What to do with columns whose defaults could not be materialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Fail the whole diff on the first invalid column.
    #[default]
    Abort,
    /// Leave invalid columns out and report them.
    Skip,
}

/// Everything a diff produced: the ordered statements, the columns or
/// tables left out because they failed, and non-blocking notices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDiff {
    pub statements: Vec<ChangeStatement>,
    pub skipped: Vec<DiffError>,
    pub notices: Vec<DiffError>,
}

impl SchemaDiff {
    pub(crate) fn from_statements(statements: Vec<ChangeStatement>) -> Self {
        Self {
            statements,
            ..Self::default()
        }
    }

    pub(crate) fn from_skipped(error: DiffError) -> Self {
        Self {
            skipped: vec![error],
            ..Self::default()
        }
    }

    fn extend(&mut self, other: SchemaDiff) {
        self.statements.extend(other.statements);
        self.skipped.extend(other.skipped);
        self.notices.extend(other.notices);
    }

    /// No statements and nothing skipped.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty() && self.skipped.is_empty()
    }

    pub fn into_statements(self, policy: ErrorPolicy) -> Result<Vec<ChangeStatement>, DiffError> {
        match (policy, self.skipped.into_iter().next()) {
            (ErrorPolicy::Abort, Some(first)) => Err(first),
            _ => Ok(self.statements),
        }
    }
}

/// Diff two snapshots, keeping every failure and notice.
pub fn diff_report(old: &Snapshot, new: &Snapshot) -> SchemaDiff {
    info!("Diffing snapshots...");

    let mut report = SchemaDiff::from_statements(schemas::diff_all(old, new));

    for table_diff in diff_list(old.tables(), new.tables(), Table::id, |o, n| {
        vec![tables::diff(o, n)]
    }) {
        report.extend(table_diff);
    }

    report.statements = diff_order(report.statements, old, new);

    info!(
        statements = report.statements.len(),
        skipped = report.skipped.len(),
        notices = report.notices.len(),
        "Diff complete"
    );
    report
}

/// Diff two snapshots and fail on the first column that cannot be
/// materialized.
pub fn diff_all(old: &Snapshot, new: &Snapshot) -> Result<Vec<ChangeStatement>, DiffError> {
    diff_report(old, new).into_statements(ErrorPolicy::Abort)
}

pub fn diff_list<T, I: Eq + Ord + Clone, R>(
    old: &[T],
    new: &[T],
    id_of: impl Fn(&T) -> I,
    diff_fn: impl Fn(Option<&T>, Option<&T>) -> Vec<R>,
) -> Vec<R> {
    let mut old_map = BTreeMap::new();
    let mut new_map = BTreeMap::new();
    for o in old {
        old_map.insert(id_of(o), o);
    }
    for n in new {
        new_map.insert(id_of(n), n);
    }

    let all_ids: BTreeSet<_> = old_map.keys().chain(new_map.keys()).cloned().collect();

    all_ids
        .into_iter()
        .flat_map(|id| diff_fn(old_map.get(&id).copied(), new_map.get(&id).copied()))
        .collect()
}

/// Coarse execution phase of a statement.
fn phase(statement: &ChangeStatement) -> u8 {
    match statement {
        ChangeStatement::CreateSchema(_) => 0,
        ChangeStatement::CreateTable(_) => 1,
        ChangeStatement::CreateReference(_) => 3,
        ChangeStatement::DropTable(_) => 4,
        ChangeStatement::DropSchema(_) => 5,
        _ => 2,
    }
}

/// Order statements by phase, then topo-sort by their dependencies.
///
/// Non-drop statements run after whatever creates their dependencies (from
/// `new`). Drops use `old`: a dropped object runs before the drops of the
/// objects it depended on. The sort is stable: among ready statements the
/// earliest in phase order always goes first, so the phase order survives
/// wherever dependencies allow. Edges that would close a cycle are dropped.
pub fn diff_order(
    statements: Vec<ChangeStatement>,
    old: &Snapshot,
    new: &Snapshot,
) -> Vec<ChangeStatement> {
    debug!("Ordering {} statements...", statements.len());

    let mut statements = statements;
    statements.sort_by_key(phase);

    let mut graph: DiGraph<usize, ()> = DiGraph::new();
    let node_indices: Vec<NodeIndex> = (0..statements.len()).map(|i| graph.add_node(i)).collect();

    let mut creators: BTreeMap<DbObjectId, Vec<usize>> = BTreeMap::new();
    let mut drops: BTreeMap<DbObjectId, Vec<usize>> = BTreeMap::new();
    for (i, statement) in statements.iter().enumerate() {
        if statement.is_drop() {
            drops.entry(statement.id()).or_default().push(i);
        } else if statement.is_create() {
            creators.entry(statement.id()).or_default().push(i);
            if let ChangeStatement::CreateTable(create) = statement {
                for column in &create.columns {
                    creators
                        .entry(DbObjectId::Column {
                            schema: create.table.schema.clone(),
                            table: create.table.table_name.clone(),
                            column: column.name.clone(),
                        })
                        .or_default()
                        .push(i);
                }
            }
        }
    }

    let mut missing_deps: Vec<(DbObjectId, DbObjectId)> = Vec::new();

    for (i, statement) in statements.iter().enumerate() {
        if statement.is_drop() {
            for dep in old.dependencies_of(&statement.id()) {
                for &dep_i in drops.get(dep).map(Vec::as_slice).unwrap_or_default() {
                    add_edge(&mut graph, &node_indices, &statements, i, dep_i);
                }
            }
            continue;
        }

        for dep in statement.dependencies() {
            if let Some(indices) = creators.get(&dep) {
                for &dep_i in indices {
                    add_edge(&mut graph, &node_indices, &statements, dep_i, i);
                }
            } else if !new.contains_id(&dep) {
                missing_deps.push((statement.id(), dep));
            }
        }
    }

    // constraint removals run before anything that needs their columns free
    let mut releasers: BTreeMap<DbObjectId, Vec<usize>> = BTreeMap::new();
    for (i, statement) in statements.iter().enumerate() {
        for column in released_columns(statement, old) {
            releasers.entry(column).or_default().push(i);
        }
    }
    for (i, statement) in statements.iter().enumerate() {
        for column in constrained_columns(statement, old) {
            for &dep_i in releasers.get(&column).map(Vec::as_slice).unwrap_or_default() {
                add_edge(&mut graph, &node_indices, &statements, dep_i, i);
            }
        }
    }

    for (object_id, missing_dep) in &missing_deps {
        warn!(
            "{} depends on {} which is not in the snapshot (may be filtered by config)",
            object_id, missing_dep
        );
    }

    // stable Kahn: the lowest ready index always goes next
    let mut in_degree: Vec<usize> = node_indices
        .iter()
        .map(|&n| graph.neighbors_directed(n, Direction::Incoming).count())
        .collect();
    let mut ready: BTreeSet<usize> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, d)| **d == 0)
        .map(|(i, _)| i)
        .collect();
    let mut order = Vec::with_capacity(statements.len());

    while let Some(i) = ready.pop_first() {
        order.push(i);
        for next in graph.neighbors_directed(node_indices[i], Direction::Outgoing) {
            let j = graph[next];
            in_degree[j] -= 1;
            if in_degree[j] == 0 {
                ready.insert(j);
            }
        }
    }

    let mut slots: Vec<Option<ChangeStatement>> = statements.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

fn column_ids(schema: &str, table: &str, columns: &[String]) -> Vec<DbObjectId> {
    columns
        .iter()
        .map(|column| DbObjectId::Column {
            schema: schema.to_string(),
            table: table.to_string(),
            column: column.clone(),
        })
        .collect()
}

/// Columns a constraint removal stops holding on to. A foreign key holds the
/// referenced columns of the other table; keys hold their own columns.
fn released_columns(statement: &ChangeStatement, old: &Snapshot) -> Vec<DbObjectId> {
    let (ChangeStatement::DeleteReference(target)
    | ChangeStatement::DeleteUniqueConstraint(target)
    | ChangeStatement::DeleteCompositePk(target)) = statement
    else {
        return Vec::new();
    };
    let Some(table) = old.table(&target.table.schema, &target.table.table_name) else {
        return Vec::new();
    };
    let name = &target.constraint_name;

    match statement {
        ChangeStatement::DeleteReference(_) => table
            .foreign_keys
            .iter()
            .filter(|fk| &fk.name == name)
            .flat_map(|fk| {
                column_ids(&fk.references_schema, &fk.references_table, &fk.references_columns)
            })
            .collect(),
        ChangeStatement::DeleteUniqueConstraint(_) => table
            .unique_constraints
            .iter()
            .filter(|u| &u.name == name)
            .flat_map(|u| column_ids(&table.schema, &table.name, &u.columns))
            .collect(),
        _ => table
            .primary_key
            .iter()
            .filter(|pk| &pk.name == name)
            .flat_map(|pk| column_ids(&table.schema, &table.name, &pk.columns))
            .collect(),
    }
}

/// Columns a statement can only touch once no removed constraint holds them.
fn constrained_columns(statement: &ChangeStatement, old: &Snapshot) -> Vec<DbObjectId> {
    match statement {
        ChangeStatement::AlterTableDropColumn(column)
        | ChangeStatement::AlterTableAlterColumnDropPrimaryKey(column) => {
            vec![column.db_object_id()]
        }
        ChangeStatement::AlterTableAlterColumnSetType(op) => vec![op.column.db_object_id()],
        ChangeStatement::DeleteUniqueConstraint(_) | ChangeStatement::DeleteCompositePk(_) => {
            released_columns(statement, old)
        }
        _ => Vec::new(),
    }
}

/// Add `from -> to` unless it is a self-loop or would close a cycle.
fn add_edge(
    graph: &mut DiGraph<usize, ()>,
    node_indices: &[NodeIndex],
    statements: &[ChangeStatement],
    from: usize,
    to: usize,
) {
    if from == to {
        return;
    }
    let (a, b) = (node_indices[from], node_indices[to]);
    if has_path_connecting(&*graph, b, a, None) {
        warn!(
            "Ignoring ordering constraint {} -> {}: it would create a dependency cycle",
            statements[from].db_object_id(),
            statements[to].db_object_id()
        );
        return;
    }
    graph.update_edge(a, b, ());
}
