//! Constraint operations

use serde::Serialize;

use super::table::TableTarget;
use crate::catalog::constraint::{ForeignKey, PrimaryKey, UniqueConstraint};
use crate::catalog::id::DbObjectId;
use crate::render::sql::{render_foreign_key, render_unique};
use crate::render::{RenderedSql, ident_list, quote_ident};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintTarget {
    #[serde(flatten)]
    pub table: TableTarget,
    pub constraint_name: String,
}

impl ConstraintTarget {
    pub fn new(table: TableTarget, constraint_name: impl Into<String>) -> Self {
        Self {
            table,
            constraint_name: constraint_name.into(),
        }
    }

    pub fn db_object_id(&self) -> DbObjectId {
        constraint_id(&self.table, &self.constraint_name)
    }

    pub fn drop_sql(&self) -> RenderedSql {
        RenderedSql::destructive(self.table.alter(&format!(
            "DROP CONSTRAINT {}",
            quote_ident(&self.constraint_name)
        )))
    }
}

fn constraint_id(table: &TableTarget, name: &str) -> DbObjectId {
    DbObjectId::Constraint {
        schema: table.schema.clone(),
        table: table.table_name.clone(),
        name: name.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompositePk {
    #[serde(flatten)]
    pub table: TableTarget,
    pub constraint: PrimaryKey,
}

impl CreateCompositePk {
    pub fn db_object_id(&self) -> DbObjectId {
        constraint_id(&self.table, &self.constraint.name)
    }

    pub fn to_sql(&self) -> RenderedSql {
        RenderedSql::new(self.table.alter(&format!(
            "ADD CONSTRAINT {} PRIMARY KEY ({})",
            quote_ident(&self.constraint.name),
            ident_list(&self.constraint.columns)
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUniqueConstraint {
    #[serde(flatten)]
    pub table: TableTarget,
    pub constraint: UniqueConstraint,
}

impl CreateUniqueConstraint {
    pub fn db_object_id(&self) -> DbObjectId {
        constraint_id(&self.table, &self.constraint.name)
    }

    pub fn to_sql(&self) -> RenderedSql {
        RenderedSql::new(
            self.table
                .alter(&format!("ADD {}", render_unique(&self.constraint))),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReference {
    #[serde(flatten)]
    pub table: TableTarget,
    pub foreign_key: ForeignKey,
}

impl CreateReference {
    pub fn db_object_id(&self) -> DbObjectId {
        constraint_id(&self.table, &self.foreign_key.name)
    }

    pub fn to_sql(&self) -> RenderedSql {
        RenderedSql::new(
            self.table
                .alter(&format!("ADD {}", render_foreign_key(&self.foreign_key))),
        )
    }
}
