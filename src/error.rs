//! Error taxonomy for snapshot construction, type resolution, literal
//! serialization and diffing.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// A declared column type name that the resolver does not know.
    #[error("unknown column type '{kind}'")]
    UnknownTypeKind { kind: String },

    /// A default value whose shape does not fit the column's declared
    /// type or array dimensionality.
    #[error("cannot render {value_kind} default for column of type {column_type}: {reason}")]
    UnsupportedValueKind {
        column_type: String,
        value_kind: String,
        reason: String,
    },

    /// A column dropped and another added at the same position of the same
    /// table. Always resolved as drop + add; reported so callers can review.
    #[error(
        "column {dropped} ({dropped_type}) dropped and {added} ({added_type}) added at the same position of table {table}; treated as drop + add"
    )]
    AmbiguousRename {
        table: String,
        dropped: String,
        dropped_type: String,
        added: String,
        added_type: String,
    },

    #[error("table {table} appears more than once in the snapshot")]
    DuplicateTable { table: String },

    #[error("column {column} appears more than once in table {table}")]
    DuplicateColumn { table: String, column: String },

    /// Location wrapper for failures raised while materializing one column.
    #[error("column {column} of table {table}: {source}")]
    InvalidColumn {
        table: String,
        column: String,
        #[source]
        source: Box<DiffError>,
    },
}

impl DiffError {
    pub(crate) fn unsupported(
        column_type: impl Into<String>,
        value_kind: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DiffError::UnsupportedValueKind {
            column_type: column_type.into(),
            value_kind: value_kind.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn in_column(self, table: impl Into<String>, column: impl Into<String>) -> Self {
        DiffError::InvalidColumn {
            table: table.into(),
            column: column.into(),
            source: Box::new(self),
        }
    }

    /// True for conditions that are reported but never block a diff.
    pub fn is_notice(&self) -> bool {
        matches!(self, DiffError::AmbiguousRename { .. })
    }
}
