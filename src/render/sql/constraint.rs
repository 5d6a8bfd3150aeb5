//! Shared SQL rendering for constraint clauses

use crate::catalog::constraint::{ForeignKey, PrimaryKey, UniqueConstraint};
use crate::render::{ident_list, qualified_ident, quote_ident};

/// `CONSTRAINT "name" PRIMARY KEY ("a", "b")`
pub fn render_primary_key(pk: &PrimaryKey) -> String {
    format!(
        "CONSTRAINT {} PRIMARY KEY ({})",
        quote_ident(&pk.name),
        ident_list(&pk.columns)
    )
}

/// `CONSTRAINT "name" UNIQUE [NULLS NOT DISTINCT] ("a")`
pub fn render_unique(unique: &UniqueConstraint) -> String {
    let nulls = if unique.nulls_not_distinct {
        " NULLS NOT DISTINCT"
    } else {
        ""
    };
    format!(
        "CONSTRAINT {} UNIQUE{} ({})",
        quote_ident(&unique.name),
        nulls,
        ident_list(&unique.columns)
    )
}

/// `CONSTRAINT "name" FOREIGN KEY ("a") REFERENCES "s"."t" ("id") [ON DELETE ...] [ON UPDATE ...]`
pub fn render_foreign_key(fk: &ForeignKey) -> String {
    let mut def = format!(
        "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
        quote_ident(&fk.name),
        ident_list(&fk.columns),
        qualified_ident(&fk.references_schema, &fk.references_table),
        ident_list(&fk.references_columns)
    );

    if let Some(action) = fk.on_delete {
        def.push_str(&format!(" ON DELETE {}", action));
    }
    if let Some(action) = fk.on_update {
        def.push_str(&format!(" ON UPDATE {}", action));
    }

    def
}
