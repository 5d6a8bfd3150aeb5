//! Change statements produced by the diff engine.
//!
//! Each statement is a self-contained record: it carries every name, type
//! and serialized literal needed to render it, and serializes to a tagged
//! JSON object (`{"type": "alter_table_add_column", "tableName": ..., ...}`).

use serde::Serialize;

use crate::catalog::id::DbObjectId;
use crate::render::RenderedSql;

pub use column::*;
pub use constraint::*;
pub use schema::*;
pub use table::*;

pub mod column;
pub mod constraint;
pub mod schema;
pub mod table;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeStatement {
    CreateSchema(SchemaTarget),
    DropSchema(SchemaTarget),
    CreateTable(CreateTable),
    DropTable(TableTarget),
    AlterTableAddColumn(AddColumn),
    AlterTableDropColumn(ColumnTarget),
    AlterTableAlterColumnSetType(AlterColumnType),
    AlterTableAlterColumnSetDefault(SetColumnDefault),
    AlterTableAlterColumnDropDefault(ColumnTarget),
    #[serde(rename = "alter_table_alter_column_set_notnull")]
    AlterTableAlterColumnSetNotNull(ColumnTarget),
    #[serde(rename = "alter_table_alter_column_drop_notnull")]
    AlterTableAlterColumnDropNotNull(ColumnTarget),
    #[serde(rename = "alter_table_alter_column_set_pk")]
    AlterTableAlterColumnSetPrimaryKey(ColumnTarget),
    #[serde(rename = "alter_table_alter_column_drop_pk")]
    AlterTableAlterColumnDropPrimaryKey(ColumnTarget),
    CreateCompositePk(CreateCompositePk),
    DeleteCompositePk(ConstraintTarget),
    CreateUniqueConstraint(CreateUniqueConstraint),
    DeleteUniqueConstraint(ConstraintTarget),
    CreateReference(CreateReference),
    DeleteReference(ConstraintTarget),
}

/// Trait for rendering SQL from statements
pub trait SqlRenderer {
    fn to_sql(&self) -> Vec<RenderedSql>;
    fn db_object_id(&self) -> DbObjectId;
    fn is_destructive(&self) -> bool {
        false
    }
}

impl SqlRenderer for ChangeStatement {
    fn to_sql(&self) -> Vec<RenderedSql> {
        let rendered = match self {
            ChangeStatement::CreateSchema(s) => s.create_sql(),
            ChangeStatement::DropSchema(s) => s.drop_sql(),
            ChangeStatement::CreateTable(op) => op.to_sql(),
            ChangeStatement::DropTable(t) => t.drop_sql(),
            ChangeStatement::AlterTableAddColumn(op) => op.to_sql(),
            ChangeStatement::AlterTableDropColumn(c) => c.drop_sql(),
            ChangeStatement::AlterTableAlterColumnSetType(op) => op.to_sql(),
            ChangeStatement::AlterTableAlterColumnSetDefault(op) => op.to_sql(),
            ChangeStatement::AlterTableAlterColumnDropDefault(c) => c.drop_default_sql(),
            ChangeStatement::AlterTableAlterColumnSetNotNull(c) => c.set_not_null_sql(),
            ChangeStatement::AlterTableAlterColumnDropNotNull(c) => c.drop_not_null_sql(),
            ChangeStatement::AlterTableAlterColumnSetPrimaryKey(c) => c.set_primary_key_sql(),
            ChangeStatement::AlterTableAlterColumnDropPrimaryKey(c) => c.drop_primary_key_sql(),
            ChangeStatement::CreateCompositePk(op) => op.to_sql(),
            ChangeStatement::CreateUniqueConstraint(op) => op.to_sql(),
            ChangeStatement::CreateReference(op) => op.to_sql(),
            ChangeStatement::DeleteCompositePk(c)
            | ChangeStatement::DeleteUniqueConstraint(c)
            | ChangeStatement::DeleteReference(c) => c.drop_sql(),
        };
        vec![rendered]
    }

    fn db_object_id(&self) -> DbObjectId {
        match self {
            ChangeStatement::CreateSchema(s) | ChangeStatement::DropSchema(s) => s.db_object_id(),
            ChangeStatement::CreateTable(op) => op.table.db_object_id(),
            ChangeStatement::DropTable(t) => t.db_object_id(),
            ChangeStatement::AlterTableAddColumn(op) => op.db_object_id(),
            ChangeStatement::AlterTableAlterColumnSetType(op) => op.column.db_object_id(),
            ChangeStatement::AlterTableAlterColumnSetDefault(op) => op.column.db_object_id(),
            ChangeStatement::AlterTableDropColumn(c)
            | ChangeStatement::AlterTableAlterColumnDropDefault(c)
            | ChangeStatement::AlterTableAlterColumnSetNotNull(c)
            | ChangeStatement::AlterTableAlterColumnDropNotNull(c)
            | ChangeStatement::AlterTableAlterColumnSetPrimaryKey(c)
            | ChangeStatement::AlterTableAlterColumnDropPrimaryKey(c) => c.db_object_id(),
            ChangeStatement::CreateCompositePk(op) => op.db_object_id(),
            ChangeStatement::CreateUniqueConstraint(op) => op.db_object_id(),
            ChangeStatement::CreateReference(op) => op.db_object_id(),
            ChangeStatement::DeleteCompositePk(c)
            | ChangeStatement::DeleteUniqueConstraint(c)
            | ChangeStatement::DeleteReference(c) => c.db_object_id(),
        }
    }

    fn is_destructive(&self) -> bool {
        self.to_sql()
            .iter()
            .any(|r| r.safety == crate::render::Safety::Destructive)
    }
}

impl ChangeStatement {
    /// The statement's tag as it appears in serialized output.
    pub fn kind(&self) -> &'static str {
        match self {
            ChangeStatement::CreateSchema(_) => "create_schema",
            ChangeStatement::DropSchema(_) => "drop_schema",
            ChangeStatement::CreateTable(_) => "create_table",
            ChangeStatement::DropTable(_) => "drop_table",
            ChangeStatement::AlterTableAddColumn(_) => "alter_table_add_column",
            ChangeStatement::AlterTableDropColumn(_) => "alter_table_drop_column",
            ChangeStatement::AlterTableAlterColumnSetType(_) => "alter_table_alter_column_set_type",
            ChangeStatement::AlterTableAlterColumnSetDefault(_) => {
                "alter_table_alter_column_set_default"
            }
            ChangeStatement::AlterTableAlterColumnDropDefault(_) => {
                "alter_table_alter_column_drop_default"
            }
            ChangeStatement::AlterTableAlterColumnSetNotNull(_) => {
                "alter_table_alter_column_set_notnull"
            }
            ChangeStatement::AlterTableAlterColumnDropNotNull(_) => {
                "alter_table_alter_column_drop_notnull"
            }
            ChangeStatement::AlterTableAlterColumnSetPrimaryKey(_) => "alter_table_alter_column_set_pk",
            ChangeStatement::AlterTableAlterColumnDropPrimaryKey(_) => {
                "alter_table_alter_column_drop_pk"
            }
            ChangeStatement::CreateCompositePk(_) => "create_composite_pk",
            ChangeStatement::DeleteCompositePk(_) => "delete_composite_pk",
            ChangeStatement::CreateUniqueConstraint(_) => "create_unique_constraint",
            ChangeStatement::DeleteUniqueConstraint(_) => "delete_unique_constraint",
            ChangeStatement::CreateReference(_) => "create_reference",
            ChangeStatement::DeleteReference(_) => "delete_reference",
        }
    }

    /// Returns the database object ID for this statement
    pub fn id(&self) -> DbObjectId {
        self.db_object_id()
    }

    /// The table this statement touches, if any.
    pub fn table_id(&self) -> Option<DbObjectId> {
        self.id().table()
    }

    /// Returns true if this statement removes a table or schema
    pub fn is_drop(&self) -> bool {
        matches!(
            self,
            ChangeStatement::DropTable(_) | ChangeStatement::DropSchema(_)
        )
    }

    /// Returns true if this statement brings a new object into existence
    pub fn is_create(&self) -> bool {
        matches!(
            self,
            ChangeStatement::CreateSchema(_)
                | ChangeStatement::CreateTable(_)
                | ChangeStatement::AlterTableAddColumn(_)
                | ChangeStatement::CreateCompositePk(_)
                | ChangeStatement::CreateUniqueConstraint(_)
                | ChangeStatement::CreateReference(_)
        )
    }

    /// Returns true for statements that link tables together. These run
    /// after every table exists.
    pub fn is_relationship(&self) -> bool {
        matches!(self, ChangeStatement::CreateReference(_))
    }

    /// Objects that must exist before this statement can run.
    pub fn dependencies(&self) -> Vec<DbObjectId> {
        let mut deps = Vec::new();
        match self {
            ChangeStatement::CreateSchema(_) | ChangeStatement::DropSchema(_) => {}
            ChangeStatement::CreateTable(op) => {
                if !op.table.schema.is_empty() {
                    deps.push(DbObjectId::Schema {
                        name: op.table.schema.clone(),
                    });
                }
            }
            ChangeStatement::CreateReference(op) => {
                deps.push(op.table.db_object_id());
                deps.push(op.foreign_key.referenced_table_id());
                deps.extend(op.foreign_key.columns.iter().map(|c| DbObjectId::Column {
                    schema: op.table.schema.clone(),
                    table: op.table.table_name.clone(),
                    column: c.clone(),
                }));
            }
            ChangeStatement::CreateCompositePk(op) => {
                deps.push(op.table.db_object_id());
                deps.extend(op.constraint.columns.iter().map(|c| DbObjectId::Column {
                    schema: op.table.schema.clone(),
                    table: op.table.table_name.clone(),
                    column: c.clone(),
                }));
            }
            ChangeStatement::CreateUniqueConstraint(op) => {
                deps.push(op.table.db_object_id());
                deps.extend(op.constraint.columns.iter().map(|c| DbObjectId::Column {
                    schema: op.table.schema.clone(),
                    table: op.table.table_name.clone(),
                    column: c.clone(),
                }));
            }
            _ => {
                if let Some(table) = self.table_id() {
                    deps.push(table);
                }
            }
        }
        deps
    }
}
