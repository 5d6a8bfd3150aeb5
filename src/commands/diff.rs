//! pgsnap diff - Compare two schema snapshots
//!
//! Reads the "from" and "to" snapshots as JSON, applies the configured
//! object filter and prints the change statements that turn one into the
//! other.

use crate::catalog::Snapshot;
use crate::config::{Config, ObjectFilter};
use crate::diff::{ErrorPolicy, diff_report};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use super::diff_output::output_diff;

/// Arguments for the diff command
#[derive(Debug, Default)]
pub struct DiffArgs {
    pub from: String,
    pub to: String,
    pub output_sql: Option<String>,
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))
}

pub fn cmd_diff(config: &Config, args: DiffArgs) -> Result<()> {
    let from = load_snapshot(Path::new(&args.from))?;
    let to = load_snapshot(Path::new(&args.to))?;

    let filter = ObjectFilter::new(&config.objects);
    let from = filter.filter_snapshot(&from);
    let to = filter.filter_snapshot(&to);

    info!("Comparing {} with {}", args.from, args.to);
    let report = diff_report(&from, &to);

    if config.diff.report_ambiguous_renames {
        for notice in &report.notices {
            eprintln!("notice: {}", notice);
        }
    }

    if config.diff.on_error == ErrorPolicy::Skip {
        for skipped in &report.skipped {
            eprintln!("skipped: {}", skipped);
        }
    }

    let statements = report
        .into_statements(config.diff.on_error)
        .context("Diff aborted; rerun with --skip-invalid to leave invalid columns out")?;

    output_diff(&statements, config.output.format, args.output_sql.as_deref())
}
