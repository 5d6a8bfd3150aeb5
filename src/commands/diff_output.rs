//! Formatting for `pgsnap diff` results

use crate::config::DiffFormat;
use crate::diff::operations::{ChangeStatement, SqlRenderer};
use anyhow::{Context, Result};
use itertools::Itertools;

/// Render ordered statements in the requested format.
pub fn format_diff(statements: &[ChangeStatement], format: DiffFormat) -> Result<String> {
    match format {
        DiffFormat::Json => Ok(serde_json::to_string_pretty(statements)?),
        DiffFormat::Sql => Ok(render_sql(statements)),
        DiffFormat::Detailed => Ok(format_detailed(statements)),
    }
}

/// All rendered SQL, one statement per line.
pub fn render_sql(statements: &[ChangeStatement]) -> String {
    statements
        .iter()
        .flat_map(SqlRenderer::to_sql)
        .map(|rendered| rendered.sql)
        .join("\n")
}

/// Statements grouped by the object they touch, in execution order, with
/// destructive statements marked.
fn format_detailed(statements: &[ChangeStatement]) -> String {
    if statements.is_empty() {
        return "No differences found.".to_string();
    }

    let destructive = statements.iter().filter(|s| s.is_destructive()).count();
    let mut out = format!(
        "{} change statement(s), {} destructive\n",
        statements.len(),
        destructive
    );

    for (object, group) in &statements
        .iter()
        .chunk_by(|s| s.table_id().unwrap_or_else(|| s.id()))
    {
        out.push_str(&format!("\n{}:\n", object));
        for statement in group {
            let marker = if statement.is_destructive() { "!" } else { "+" };
            for rendered in statement.to_sql() {
                out.push_str(&format!(
                    "  {} [{}] {}\n",
                    marker,
                    statement.kind(),
                    rendered.sql.replace('\n', "\n      ")
                ));
            }
        }
    }

    out
}

/// Print the diff to stdout and optionally save the SQL to a file.
pub fn output_diff(
    statements: &[ChangeStatement],
    format: DiffFormat,
    output_sql: Option<&str>,
) -> Result<()> {
    println!("{}", format_diff(statements, format)?);

    if let Some(path) = output_sql {
        let mut sql = render_sql(statements);
        if !sql.is_empty() {
            sql.push('\n');
        }
        std::fs::write(path, sql).with_context(|| format!("Failed to write SQL to {}", path))?;
        eprintln!("SQL written to {}", path);
    }

    Ok(())
}
