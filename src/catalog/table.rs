//! Tables and columns as they appear in a snapshot
use serde::{Deserialize, Serialize};

use super::column_type::{ColumnKind, canonical_name};
use super::constraint::{ForeignKey, PrimaryKey, UniqueConstraint};
use super::default_value::DefaultValue;
use super::id::{DbObjectId, DependsOn};
use super::DEFAULT_SCHEMA;
use crate::error::DiffError;
use crate::render::literal::serialize_default;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    #[serde(default)]
    pub dimensions: usize,
    #[serde(default)]
    pub not_null: bool,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
            dimensions: 0,
            not_null: false,
            primary_key: false,
            default: None,
        }
    }

    /// Canonical type name including one `[]` per array dimension.
    pub fn data_type(&self) -> String {
        canonical_name(&self.kind, self.dimensions)
    }

    /// The default rendered as a SQL literal cast to this column's type.
    pub fn rendered_default(&self) -> Result<Option<String>, DiffError> {
        self.default
            .as_ref()
            .map(|value| serialize_default(value, &self.kind, self.dimensions))
            .transpose()
    }

    /// Self-contained definition carried by create and add statements.
    pub fn definition(&self) -> Result<ColumnDefinition, DiffError> {
        Ok(ColumnDefinition {
            name: self.name.clone(),
            data_type: self.data_type(),
            primary_key: self.primary_key,
            not_null: self.not_null,
            default: self.rendered_default()?,
        })
    }
}

/// A column with its type resolved and its default already serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub primary_key: bool,
    pub not_null: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default)]
    pub schema: String,
    pub name: String,
    pub columns: Vec<Column>,
    /// Composite primary key. Single-column keys use [`Column::primary_key`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<PrimaryKey>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique_constraints: Vec<UniqueConstraint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    pub fn new(schema: impl Into<String>, name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            columns,
            primary_key: None,
            unique_constraints: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    pub fn id(&self) -> DbObjectId {
        DbObjectId::Table {
            schema: self.schema.clone(),
            name: self.name.clone(),
        }
    }

    /// Spell the default namespace as `""` for the table and the tables it
    /// references, so `public.users` and `users` share one identity.
    pub(crate) fn normalize_schema(&mut self) {
        if self.schema == DEFAULT_SCHEMA {
            self.schema.clear();
        }
        for fk in &mut self.foreign_keys {
            if fk.references_schema == DEFAULT_SCHEMA {
                fk.references_schema.clear();
            }
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Display name, schema-qualified unless in the default namespace.
    pub fn qualified_name(&self) -> String {
        if self.schema.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.schema, self.name)
        }
    }
}

impl DependsOn for Table {
    fn id(&self) -> DbObjectId {
        self.id()
    }

    /// The table's namespace plus every other table it references.
    fn depends_on(&self) -> Vec<DbObjectId> {
        let mut deps = Vec::new();
        if !self.schema.is_empty() {
            deps.push(DbObjectId::Schema {
                name: self.schema.clone(),
            });
        }
        let own_id = self.id();
        for fk in &self.foreign_keys {
            let referenced = fk.referenced_table_id();
            if referenced != own_id && !deps.contains(&referenced) {
                deps.push(referenced);
            }
        }
        deps
    }
}
