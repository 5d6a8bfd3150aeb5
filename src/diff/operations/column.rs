//! Column operations within ALTER TABLE

use serde::Serialize;

use super::table::TableTarget;
use crate::catalog::id::DbObjectId;
use crate::catalog::table::ColumnDefinition;
use crate::render::sql::render_column_definition;
use crate::render::{RenderedSql, quote_ident};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnTarget {
    #[serde(flatten)]
    pub table: TableTarget,
    pub column_name: String,
}

impl ColumnTarget {
    pub fn new(table: TableTarget, column_name: impl Into<String>) -> Self {
        Self {
            table,
            column_name: column_name.into(),
        }
    }

    pub fn db_object_id(&self) -> DbObjectId {
        DbObjectId::Column {
            schema: self.table.schema.clone(),
            table: self.table.table_name.clone(),
            column: self.column_name.clone(),
        }
    }

    /// `ALTER TABLE <table> ALTER COLUMN <column> <action>;`
    pub(crate) fn alter_column(&self, action: &str) -> String {
        self.table.alter(&format!(
            "ALTER COLUMN {} {}",
            quote_ident(&self.column_name),
            action
        ))
    }

    pub fn drop_sql(&self) -> RenderedSql {
        RenderedSql::destructive(self.table.alter(&format!(
            "DROP COLUMN IF EXISTS {}",
            quote_ident(&self.column_name)
        )))
    }

    pub fn drop_default_sql(&self) -> RenderedSql {
        RenderedSql::new(self.alter_column("DROP DEFAULT"))
    }

    pub fn set_not_null_sql(&self) -> RenderedSql {
        RenderedSql::new(self.alter_column("SET NOT NULL"))
    }

    pub fn drop_not_null_sql(&self) -> RenderedSql {
        RenderedSql::new(self.alter_column("DROP NOT NULL"))
    }

    pub fn set_primary_key_sql(&self) -> RenderedSql {
        RenderedSql::new(
            self.table
                .alter(&format!("ADD PRIMARY KEY ({})", quote_ident(&self.column_name))),
        )
    }

    /// Single-column keys carry PostgreSQL's default `<table>_pkey` name.
    pub fn drop_primary_key_sql(&self) -> RenderedSql {
        let constraint = format!("{}_pkey", self.table.table_name);
        RenderedSql::destructive(
            self.table
                .alter(&format!("DROP CONSTRAINT {}", quote_ident(&constraint))),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddColumn {
    #[serde(flatten)]
    pub table: TableTarget,
    pub column: ColumnDefinition,
}

impl AddColumn {
    pub fn db_object_id(&self) -> DbObjectId {
        DbObjectId::Column {
            schema: self.table.schema.clone(),
            table: self.table.table_name.clone(),
            column: self.column.name.clone(),
        }
    }

    pub fn to_sql(&self) -> RenderedSql {
        RenderedSql::new(self.table.alter(&format!(
            "ADD COLUMN {}",
            render_column_definition(&self.column)
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlterColumnType {
    #[serde(flatten)]
    pub column: ColumnTarget,
    pub old_data_type: String,
    pub new_data_type: String,
}

impl AlterColumnType {
    pub fn to_sql(&self) -> RenderedSql {
        RenderedSql::destructive(
            self.column
                .alter_column(&format!("SET DATA TYPE {}", self.new_data_type)),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetColumnDefault {
    #[serde(flatten)]
    pub column: ColumnTarget,
    pub new_default_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_default_value: Option<String>,
    pub new_data_type: String,
}

impl SetColumnDefault {
    pub fn to_sql(&self) -> RenderedSql {
        RenderedSql::new(
            self.column
                .alter_column(&format!("SET DEFAULT {}", self.new_default_value)),
        )
    }
}
