//! Table operations

use serde::Serialize;

use crate::catalog::constraint::{PrimaryKey, UniqueConstraint};
use crate::catalog::id::DbObjectId;
use crate::catalog::table::ColumnDefinition;
use crate::render::sql::render_create_table;
use crate::render::{RenderedSql, qualified_ident};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableTarget {
    pub table_name: String,
    pub schema: String,
}

impl TableTarget {
    pub fn new(schema: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            schema: schema.into(),
        }
    }

    pub fn identifier(&self) -> String {
        qualified_ident(&self.schema, &self.table_name)
    }

    pub fn db_object_id(&self) -> DbObjectId {
        DbObjectId::Table {
            schema: self.schema.clone(),
            name: self.table_name.clone(),
        }
    }

    pub fn drop_sql(&self) -> RenderedSql {
        RenderedSql::destructive(format!("DROP TABLE {};", self.identifier()))
    }

    /// `ALTER TABLE <table> <action>;`
    pub(crate) fn alter(&self, action: &str) -> String {
        format!("ALTER TABLE {} {};", self.identifier(), action)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTable {
    #[serde(flatten)]
    pub table: TableTarget,
    pub columns: Vec<ColumnDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composite_pk: Option<PrimaryKey>,
    pub unique_constraints: Vec<UniqueConstraint>,
}

impl CreateTable {
    pub fn to_sql(&self) -> RenderedSql {
        RenderedSql::new(render_create_table(self))
    }
}
