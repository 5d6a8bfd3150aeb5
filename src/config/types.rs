use crate::diff::ErrorPolicy;
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

/// Raw configuration input - all fields Optional for merging
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigInput {
    pub objects: Option<ObjectsInput>,
    pub diff: Option<DiffInput>,
    pub output: Option<OutputInput>,
}

/// Resolved configuration with all defaults applied
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub objects: Objects,
    pub diff: Diff,
    pub output: Output,
}

// Object filtering configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ObjectsInput {
    pub include: Option<ObjectIncludeInput>,
    pub exclude: Option<ObjectExcludeInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ObjectIncludeInput {
    pub schemas: Option<Vec<String>>,
    pub tables: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ObjectExcludeInput {
    pub schemas: Option<Vec<String>>,
    pub tables: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct Objects {
    pub include: ObjectInclude,
    pub exclude: ObjectExclude,
}

#[derive(Debug, Clone, Default)]
pub struct ObjectInclude {
    pub schemas: Vec<String>,
    pub tables: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ObjectExclude {
    pub schemas: Vec<String>,
    pub tables: Vec<String>,
}

// Diff behaviour
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DiffInput {
    pub on_error: Option<ErrorPolicy>,
    pub report_ambiguous_renames: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Diff {
    pub on_error: ErrorPolicy,
    pub report_ambiguous_renames: bool,
}

// Output configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputInput {
    pub format: Option<DiffFormat>,
}

#[derive(Debug, Clone, Default)]
pub struct Output {
    pub format: DiffFormat,
}

/// How the `diff` command prints statements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffFormat {
    /// Human-readable summary grouped by table
    #[default]
    Detailed,
    /// Rendered SQL only
    Sql,
    /// Change statements as a JSON array
    Json,
}

// CLI argument groups for command-specific options
#[derive(Debug, Clone, Default, Args)]
pub struct ObjectFilterArgs {
    #[arg(long, value_delimiter = ',', help = "Include only these schemas (glob patterns)")]
    pub schemas: Option<Vec<String>>,

    #[arg(long, value_delimiter = ',', help = "Include only these tables (glob patterns)")]
    pub tables: Option<Vec<String>>,

    #[arg(long, value_delimiter = ',', help = "Exclude these schemas (glob patterns)")]
    pub exclude_schemas: Option<Vec<String>>,

    #[arg(long, value_delimiter = ',', help = "Exclude these tables (glob patterns)")]
    pub exclude_tables: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DiffArgs {
    #[arg(long, value_enum, help = "Output format")]
    pub format: Option<DiffFormat>,

    #[arg(long, help = "Skip columns whose defaults cannot be rendered instead of failing")]
    pub skip_invalid: bool,

    #[arg(long, help = "Do not report possible column renames")]
    pub no_rename_notices: bool,
}

// Conversion functions from CLI args to config input
impl From<ObjectFilterArgs> for ObjectsInput {
    fn from(args: ObjectFilterArgs) -> Self {
        let include = if args.schemas.is_some() || args.tables.is_some() {
            Some(ObjectIncludeInput {
                schemas: args.schemas,
                tables: args.tables,
            })
        } else {
            None
        };

        let exclude = if args.exclude_schemas.is_some() || args.exclude_tables.is_some() {
            Some(ObjectExcludeInput {
                schemas: args.exclude_schemas,
                tables: args.exclude_tables,
            })
        } else {
            None
        };

        Self { include, exclude }
    }
}

impl From<&DiffArgs> for DiffInput {
    fn from(args: &DiffArgs) -> Self {
        Self {
            on_error: args.skip_invalid.then_some(ErrorPolicy::Skip),
            report_ambiguous_renames: args.no_rename_notices.then_some(false),
        }
    }
}

impl From<&DiffArgs> for OutputInput {
    fn from(args: &DiffArgs) -> Self {
        Self {
            format: args.format,
        }
    }
}
