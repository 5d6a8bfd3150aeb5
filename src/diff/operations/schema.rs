//! Schema (namespace) operations

use serde::Serialize;

use crate::catalog::id::DbObjectId;
use crate::render::{RenderedSql, quote_ident};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaTarget {
    pub name: String,
}

impl SchemaTarget {
    pub fn db_object_id(&self) -> DbObjectId {
        DbObjectId::Schema {
            name: self.name.clone(),
        }
    }

    pub fn create_sql(&self) -> RenderedSql {
        RenderedSql::new(format!("CREATE SCHEMA {};", quote_ident(&self.name)))
    }

    pub fn drop_sql(&self) -> RenderedSql {
        RenderedSql::destructive(format!("DROP SCHEMA {};", quote_ident(&self.name)))
    }
}
