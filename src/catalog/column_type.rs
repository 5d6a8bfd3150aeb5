//! Column type resolution.
//!
//! A [`ColumnKind`] is the scalar element type of a column. Together with the
//! column's array dimensionality it resolves to the canonical type name that
//! is used both as the cast target of default literals and as the value that
//! is compared when diffing column types.

use crate::error::DiffError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColumnKind {
    Smallint,
    Integer,
    Bigint,
    Smallserial,
    Serial,
    Bigserial,
    Boolean,
    Text,
    Varchar { length: Option<u32> },
    Char { length: Option<u32> },
    Real,
    DoublePrecision,
    Numeric { precision: Option<u32>, scale: Option<u32> },
    Date,
    Time,
    Timestamp { precision: Option<u32>, with_time_zone: bool },
    Interval,
    Json,
    Jsonb,
    Uuid,
}

/// The family of default values a column kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFamily {
    Integer,
    Float,
    Decimal,
    Boolean,
    Text,
    Date,
    Timestamp,
    Json,
}

impl ColumnKind {
    pub fn family(&self) -> ValueFamily {
        match self {
            ColumnKind::Smallint
            | ColumnKind::Integer
            | ColumnKind::Bigint
            | ColumnKind::Smallserial
            | ColumnKind::Serial
            | ColumnKind::Bigserial => ValueFamily::Integer,
            ColumnKind::Real | ColumnKind::DoublePrecision => ValueFamily::Float,
            ColumnKind::Numeric { .. } => ValueFamily::Decimal,
            ColumnKind::Boolean => ValueFamily::Boolean,
            ColumnKind::Text
            | ColumnKind::Varchar { .. }
            | ColumnKind::Char { .. }
            | ColumnKind::Time
            | ColumnKind::Interval
            | ColumnKind::Uuid => ValueFamily::Text,
            ColumnKind::Date => ValueFamily::Date,
            ColumnKind::Timestamp { .. } => ValueFamily::Timestamp,
            ColumnKind::Json | ColumnKind::Jsonb => ValueFamily::Json,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Smallint => f.write_str("smallint"),
            ColumnKind::Integer => f.write_str("integer"),
            ColumnKind::Bigint => f.write_str("bigint"),
            ColumnKind::Smallserial => f.write_str("smallserial"),
            ColumnKind::Serial => f.write_str("serial"),
            ColumnKind::Bigserial => f.write_str("bigserial"),
            ColumnKind::Boolean => f.write_str("boolean"),
            ColumnKind::Text => f.write_str("text"),
            ColumnKind::Varchar { length: None } => f.write_str("varchar"),
            ColumnKind::Varchar { length: Some(n) } => write!(f, "varchar({n})"),
            ColumnKind::Char { length: None } => f.write_str("char"),
            ColumnKind::Char { length: Some(n) } => write!(f, "char({n})"),
            ColumnKind::Real => f.write_str("real"),
            ColumnKind::DoublePrecision => f.write_str("double precision"),
            ColumnKind::Numeric { precision, scale } => match (precision, scale) {
                (Some(p), Some(s)) => write!(f, "numeric({p}, {s})"),
                (Some(p), None) => write!(f, "numeric({p})"),
                _ => f.write_str("numeric"),
            },
            ColumnKind::Date => f.write_str("date"),
            ColumnKind::Time => f.write_str("time"),
            ColumnKind::Timestamp {
                precision,
                with_time_zone,
            } => {
                f.write_str("timestamp")?;
                if let Some(p) = precision {
                    write!(f, "({p})")?;
                }
                if *with_time_zone {
                    f.write_str(" with time zone")?;
                }
                Ok(())
            }
            ColumnKind::Interval => f.write_str("interval"),
            ColumnKind::Json => f.write_str("json"),
            ColumnKind::Jsonb => f.write_str("jsonb"),
            ColumnKind::Uuid => f.write_str("uuid"),
        }
    }
}

/// Canonical type name for a kind at the given array depth, e.g.
/// `integer[][]` for `(Integer, 2)`.
pub fn canonical_name(kind: &ColumnKind, dimensions: usize) -> String {
    format!("{}{}", kind, "[]".repeat(dimensions))
}

/// Parse a declared type name and resolve it at the given array depth.
pub fn resolve(declared: &str, dimensions: usize) -> Result<String, DiffError> {
    let kind: ColumnKind = declared.parse()?;
    Ok(canonical_name(&kind, dimensions))
}

/// Splits `name(args)` into the base name and its comma separated arguments.
fn split_modifiers(s: &str) -> Option<(&str, Vec<&str>)> {
    match s.find('(') {
        None => Some((s, Vec::new())),
        Some(open) => {
            let close = s.rfind(')')?;
            if close < open || !s[close + 1..].trim().is_empty() {
                return None;
            }
            let args = s[open + 1..close].split(',').map(str::trim).collect();
            Some((s[..open].trim_end(), args))
        }
    }
}

fn parse_arg(arg: Option<&&str>, declared: &str) -> Result<Option<u32>, DiffError> {
    match arg {
        None => Ok(None),
        Some(a) => a
            .parse()
            .map(Some)
            .map_err(|_| DiffError::UnknownTypeKind {
                kind: declared.to_string(),
            }),
    }
}

impl FromStr for ColumnKind {
    type Err = DiffError;

    fn from_str(declared: &str) -> Result<Self, Self::Err> {
        let unknown = || DiffError::UnknownTypeKind {
            kind: declared.to_string(),
        };

        let normalized = declared.trim().to_ascii_lowercase();
        let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

        // Time zone suffix applies to the timestamp family only.
        let (base, with_time_zone) = match normalized.strip_suffix(" with time zone") {
            Some(rest) => (rest.to_string(), true),
            None => match normalized.strip_suffix(" without time zone") {
                Some(rest) => (rest.to_string(), false),
                None => (normalized.clone(), false),
            },
        };

        let (name, args) = split_modifiers(&base).ok_or_else(unknown)?;
        let first = parse_arg(args.first(), declared)?;
        let second = parse_arg(args.get(1), declared)?;
        if args.len() > 2 {
            return Err(unknown());
        }

        let kind = match name {
            "timestamp" => ColumnKind::Timestamp {
                precision: first,
                with_time_zone,
            },
            "timestamptz" => ColumnKind::Timestamp {
                precision: first,
                with_time_zone: true,
            },
            _ if with_time_zone => return Err(unknown()),
            "varchar" | "character varying" => ColumnKind::Varchar { length: first },
            "char" | "character" | "bpchar" => ColumnKind::Char { length: first },
            "numeric" | "decimal" => ColumnKind::Numeric {
                precision: first,
                scale: second,
            },
            _ if !args.is_empty() => return Err(unknown()),
            "smallint" | "int2" => ColumnKind::Smallint,
            "integer" | "int" | "int4" => ColumnKind::Integer,
            "bigint" | "int8" => ColumnKind::Bigint,
            "smallserial" | "serial2" => ColumnKind::Smallserial,
            "serial" | "serial4" => ColumnKind::Serial,
            "bigserial" | "serial8" => ColumnKind::Bigserial,
            "boolean" | "bool" => ColumnKind::Boolean,
            "text" => ColumnKind::Text,
            "real" | "float4" => ColumnKind::Real,
            "double precision" | "float8" => ColumnKind::DoublePrecision,
            "date" => ColumnKind::Date,
            "time" => ColumnKind::Time,
            "interval" => ColumnKind::Interval,
            "json" => ColumnKind::Json,
            "jsonb" => ColumnKind::Jsonb,
            "uuid" => ColumnKind::Uuid,
            _ => return Err(unknown()),
        };
        Ok(kind)
    }
}

impl TryFrom<String> for ColumnKind {
    type Error = DiffError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColumnKind> for String {
    fn from(kind: ColumnKind) -> Self {
        kind.to_string()
    }
}
