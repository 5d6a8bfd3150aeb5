use crate::catalog::{DEFAULT_SCHEMA, Snapshot};
use crate::config::types::{ObjectExclude, ObjectInclude, Objects};
use glob::Pattern;
use tracing::debug;

/// Object filter for determining which tables take part in a diff
pub struct ObjectFilter {
    include: ObjectInclude,
    exclude: ObjectExclude,
}

impl ObjectFilter {
    /// Create a new object filter from configuration
    pub fn new(config: &Objects) -> Self {
        Self {
            include: config.include.clone(),
            exclude: config.exclude.clone(),
        }
    }

    /// Check if a schema should be included. The empty (default) namespace
    /// is matched as `public`.
    pub fn should_include_schema(&self, schema_name: &str) -> bool {
        let schema_name = if schema_name.is_empty() {
            DEFAULT_SCHEMA
        } else {
            schema_name
        };

        if self.matches_patterns(&self.exclude.schemas, schema_name) {
            return false;
        }

        if !self.include.schemas.is_empty() {
            return self.matches_patterns(&self.include.schemas, schema_name);
        }

        true
    }

    /// Check if a table should be included
    pub fn should_include_table(&self, schema_name: &str, table_name: &str) -> bool {
        if !self.should_include_schema(schema_name) {
            return false;
        }

        if self.matches_patterns(&self.exclude.tables, table_name) {
            return false;
        }

        if !self.include.tables.is_empty() {
            return self.matches_patterns(&self.include.tables, table_name);
        }

        true
    }

    /// Apply filter to a snapshot, keeping only the tables that should be diffed
    pub fn filter_snapshot(&self, snapshot: &Snapshot) -> Snapshot {
        let filtered = snapshot.retain(|table| self.should_include_table(&table.schema, &table.name));
        debug!(
            "Filtered snapshot: kept {} of {} tables",
            filtered.tables().len(),
            snapshot.tables().len()
        );
        filtered
    }

    /// Check if a name matches any of the glob patterns
    fn matches_patterns(&self, patterns: &[String], name: &str) -> bool {
        patterns.iter().any(|pattern| {
            Pattern::new(pattern)
                .map(|p| p.matches(name))
                .unwrap_or(false)
        })
    }
}
