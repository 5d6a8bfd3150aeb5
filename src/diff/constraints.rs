//! Constraint diffs. Constraints are matched by name; any change to a
//! constraint's definition drops and recreates it.

use crate::catalog::constraint::{ForeignKey, PrimaryKey, UniqueConstraint};
use crate::diff::operations::{
    ChangeStatement, ConstraintTarget, CreateCompositePk, CreateReference,
    CreateUniqueConstraint, TableTarget,
};

/// Removal and creation halves of a constraint diff. Removals run before
/// column changes, creations after.
#[derive(Debug, Default)]
pub struct ConstraintChanges {
    pub removals: Vec<ChangeStatement>,
    pub creations: Vec<ChangeStatement>,
}

impl ConstraintChanges {
    fn drop(&mut self, statement: ChangeStatement) {
        self.removals.push(statement);
    }

    fn create(&mut self, statement: ChangeStatement) {
        self.creations.push(statement);
    }

    fn extend(&mut self, other: ConstraintChanges) {
        self.removals.extend(other.removals);
        self.creations.extend(other.creations);
    }
}

pub fn diff_primary_key(
    table: &TableTarget,
    old: Option<&PrimaryKey>,
    new: Option<&PrimaryKey>,
) -> ConstraintChanges {
    let mut changes = ConstraintChanges::default();
    match (old, new) {
        (Some(o), Some(n)) if o == n => {}
        (old, new) => {
            if let Some(o) = old {
                changes.drop(ChangeStatement::DeleteCompositePk(ConstraintTarget::new(
                    table.clone(),
                    &o.name,
                )));
            }
            if let Some(n) = new {
                changes.create(ChangeStatement::CreateCompositePk(CreateCompositePk {
                    table: table.clone(),
                    constraint: n.clone(),
                }));
            }
        }
    }
    changes
}

pub fn diff_unique(
    table: &TableTarget,
    old: Option<&UniqueConstraint>,
    new: Option<&UniqueConstraint>,
) -> ConstraintChanges {
    let mut changes = ConstraintChanges::default();
    match (old, new) {
        (Some(o), Some(n)) if o == n => {}
        (old, new) => {
            if let Some(o) = old {
                changes.drop(ChangeStatement::DeleteUniqueConstraint(
                    ConstraintTarget::new(table.clone(), &o.name),
                ));
            }
            if let Some(n) = new {
                changes.create(ChangeStatement::CreateUniqueConstraint(
                    CreateUniqueConstraint {
                        table: table.clone(),
                        constraint: n.clone(),
                    },
                ));
            }
        }
    }
    changes
}

pub fn diff_foreign_key(
    table: &TableTarget,
    old: Option<&ForeignKey>,
    new: Option<&ForeignKey>,
) -> ConstraintChanges {
    let mut changes = ConstraintChanges::default();
    match (old, new) {
        (Some(o), Some(n)) if o == n => {}
        (old, new) => {
            if let Some(o) = old {
                changes.drop(ChangeStatement::DeleteReference(ConstraintTarget::new(
                    table.clone(),
                    &o.name,
                )));
            }
            if let Some(n) = new {
                changes.create(ChangeStatement::CreateReference(CreateReference {
                    table: table.clone(),
                    foreign_key: n.clone(),
                }));
            }
        }
    }
    changes
}

/// Diff every constraint list of a table, keyed by constraint name.
pub fn diff_all(
    table: &TableTarget,
    old: &crate::catalog::Table,
    new: &crate::catalog::Table,
) -> ConstraintChanges {
    let mut changes = diff_primary_key(table, old.primary_key.as_ref(), new.primary_key.as_ref());

    for c in super::diff_list(
        &old.unique_constraints,
        &new.unique_constraints,
        |u| u.name.clone(),
        |o, n| vec![diff_unique(table, o, n)],
    ) {
        changes.extend(c);
    }

    for c in super::diff_list(
        &old.foreign_keys,
        &new.foreign_keys,
        |fk| fk.name.clone(),
        |o, n| vec![diff_foreign_key(table, o, n)],
    ) {
        changes.extend(c);
    }

    changes
}
