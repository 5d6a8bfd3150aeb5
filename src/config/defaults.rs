use crate::config::types::*;
use crate::diff::ErrorPolicy;

impl Default for Diff {
    fn default() -> Self {
        Self {
            on_error: ErrorPolicy::Abort,
            report_ambiguous_renames: true,
        }
    }
}

impl Default for ObjectExclude {
    fn default() -> Self {
        Self {
            schemas: vec!["pg_*".to_string(), "information_schema".to_string()],
            tables: vec![],
        }
    }
}
