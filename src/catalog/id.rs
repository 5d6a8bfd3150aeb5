use std::fmt;

/// Identifier for any object a change statement can create, alter or drop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DbObjectId {
    Schema {
        name: String,
    },
    Table {
        schema: String,
        name: String,
    },
    Column {
        schema: String,
        table: String,
        column: String,
    },
    Constraint {
        schema: String,
        table: String,
        name: String,
    },
}

impl DbObjectId {
    /// The namespace of this object. The default namespace is the empty string.
    pub fn schema(&self) -> &str {
        match self {
            DbObjectId::Schema { name } => name.as_str(),
            DbObjectId::Table { schema, .. }
            | DbObjectId::Column { schema, .. }
            | DbObjectId::Constraint { schema, .. } => schema.as_str(),
        }
    }

    /// The table this object belongs to, if any.
    pub fn table(&self) -> Option<DbObjectId> {
        match self {
            DbObjectId::Schema { .. } => None,
            DbObjectId::Table { .. } => Some(self.clone()),
            DbObjectId::Column { schema, table, .. }
            | DbObjectId::Constraint { schema, table, .. } => Some(DbObjectId::Table {
                schema: schema.clone(),
                name: table.clone(),
            }),
        }
    }
}

fn qualified(schema: &str, name: &str) -> String {
    if schema.is_empty() {
        name.to_string()
    } else {
        format!("{schema}.{name}")
    }
}

impl fmt::Display for DbObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema { name } => write!(f, "schema {name}"),
            Self::Table { schema, name } => write!(f, "table {}", qualified(schema, name)),
            Self::Column {
                schema,
                table,
                column,
            } => write!(f, "column {}.{column}", qualified(schema, table)),
            Self::Constraint {
                schema,
                table,
                name,
            } => write!(f, "constraint {name} on {}", qualified(schema, table)),
        }
    }
}

/// Objects that know their own identity and what must exist before them.
pub trait DependsOn {
    fn id(&self) -> DbObjectId;
    fn depends_on(&self) -> Vec<DbObjectId>;
}
