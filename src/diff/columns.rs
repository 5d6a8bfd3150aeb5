use crate::catalog::table::Column;
use crate::diff::operations::{
    AddColumn, AlterColumnType, ChangeStatement, ColumnTarget, SetColumnDefault, TableTarget,
};
use crate::error::DiffError;

/// Diff a single column of a table present in both snapshots.
///
/// Type, default, nullability and primary-key changes are independent and
/// each produce their own statement. Defaults are compared in their rendered
/// form, so two spellings of the same literal are equal.
pub fn diff(
    table: &TableTarget,
    old: Option<&Column>,
    new: Option<&Column>,
) -> Result<Vec<ChangeStatement>, DiffError> {
    match (old, new) {
        // 1) brand-new column
        (None, Some(n)) => Ok(vec![ChangeStatement::AlterTableAddColumn(AddColumn {
            table: table.clone(),
            column: n.definition()?,
        })]),
        // 2) dropped column
        (Some(o), None) => Ok(vec![ChangeStatement::AlterTableDropColumn(
            ColumnTarget::new(table.clone(), &o.name),
        )]),
        // 3) existed in both
        (Some(o), Some(n)) => {
            let target = ColumnTarget::new(table.clone(), &n.name);
            let old_default = o.rendered_default()?;
            let new_default = n.rendered_default()?;
            let old_type = o.data_type();
            let new_type = n.data_type();

            let mut changes = Vec::new();

            if old_type != new_type {
                changes.push(ChangeStatement::AlterTableAlterColumnSetType(
                    AlterColumnType {
                        column: target.clone(),
                        old_data_type: old_type,
                        new_data_type: new_type.clone(),
                    },
                ));
            }

            match (old_default, new_default) {
                (Some(_), None) => {
                    changes.push(ChangeStatement::AlterTableAlterColumnDropDefault(
                        target.clone(),
                    ));
                }
                (old_value, Some(new_value)) if old_value.as_ref() != Some(&new_value) => {
                    changes.push(ChangeStatement::AlterTableAlterColumnSetDefault(
                        SetColumnDefault {
                            column: target.clone(),
                            new_default_value: new_value,
                            old_default_value: old_value,
                            new_data_type: new_type,
                        },
                    ));
                }
                _ => {}
            }

            match (o.not_null, n.not_null) {
                (false, true) => {
                    changes.push(ChangeStatement::AlterTableAlterColumnSetNotNull(
                        target.clone(),
                    ));
                }
                (true, false) => {
                    changes.push(ChangeStatement::AlterTableAlterColumnDropNotNull(
                        target.clone(),
                    ));
                }
                _ => {}
            }

            match (o.primary_key, n.primary_key) {
                (false, true) => {
                    changes.push(ChangeStatement::AlterTableAlterColumnSetPrimaryKey(target));
                }
                (true, false) => {
                    changes.push(ChangeStatement::AlterTableAlterColumnDropPrimaryKey(target));
                }
                _ => {}
            }

            Ok(changes)
        }
        // (None, None) impossible
        _ => Ok(Vec::new()),
    }
}
