//! Default value literals.
//!
//! Scalars render as bare numbers/booleans or as a quoted string cast to the
//! column type. Arrays render as PostgreSQL array input syntax (`{a,b}`,
//! one brace pair per dimension) which is then quoted and cast to the array
//! type. Inside the braces, string-like elements are double-quoted with `"`
//! and `\` backslash-escaped; the surrounding SQL string doubles `'`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::catalog::column_type::{ColumnKind, ValueFamily, canonical_name};
use crate::catalog::default_value::DefaultValue;
use crate::error::DiffError;
use crate::render::escape_string;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const TIMESTAMP_INPUT_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

enum Scalar {
    Bare(String),
    Quoted(String),
}

/// Render `value` as a literal for a column of `kind` with `dimensions`
/// levels of array nesting.
pub fn serialize_default(
    value: &DefaultValue,
    kind: &ColumnKind,
    dimensions: usize,
) -> Result<String, DiffError> {
    let column_type = canonical_name(kind, dimensions);

    match value {
        DefaultValue::Null => return Ok("NULL".to_string()),
        DefaultValue::Expression(sql) => return Ok(sql.clone()),
        _ => {}
    }

    if dimensions == 0 {
        return match scalar(value, kind, &column_type)? {
            Scalar::Bare(literal) => Ok(literal),
            Scalar::Quoted(literal) => Ok(format!("{}::{}", escape_string(&literal), column_type)),
        };
    }

    let mut widths = vec![None; dimensions];
    let body = array_level(value, kind, dimensions, &column_type, &mut widths)?;
    Ok(format!("{}::{}", escape_string(&body), column_type))
}

/// One brace level of an array literal. `widths[d - 1]` holds the length
/// every array with `d` remaining dimensions must have, fixed by the first
/// one seen at that depth.
fn array_level(
    value: &DefaultValue,
    kind: &ColumnKind,
    dimensions: usize,
    column_type: &str,
    widths: &mut [Option<usize>],
) -> Result<String, DiffError> {
    let DefaultValue::Array(items) = value else {
        return Err(DiffError::unsupported(
            column_type,
            value.kind_name(),
            format!("expected an array at depth {dimensions}"),
        ));
    };

    if *widths[dimensions - 1].get_or_insert(items.len()) != items.len() {
        return Err(DiffError::unsupported(
            column_type,
            "array",
            "sub-arrays must all have the same length",
        ));
    }

    let mut elements = Vec::with_capacity(items.len());
    for item in items {
        let rendered = if dimensions > 1 {
            if !matches!(item, DefaultValue::Array(_)) {
                return Err(DiffError::unsupported(
                    column_type,
                    item.kind_name(),
                    "multi-dimensional arrays must contain only sub-arrays",
                ));
            }
            array_level(item, kind, dimensions - 1, column_type, widths)?
        } else {
            element(item, kind, column_type)?
        };
        elements.push(rendered);
    }

    Ok(format!("{{{}}}", elements.join(",")))
}

fn element(item: &DefaultValue, kind: &ColumnKind, column_type: &str) -> Result<String, DiffError> {
    match item {
        DefaultValue::Null => Ok("NULL".to_string()),
        DefaultValue::Array(_) => Err(DiffError::unsupported(
            column_type,
            "array",
            "array nested deeper than the column's dimensions",
        )),
        DefaultValue::Expression(_) => Err(DiffError::unsupported(
            column_type,
            "expression",
            "expressions cannot appear inside an array literal",
        )),
        _ => Ok(match scalar(item, kind, column_type)? {
            Scalar::Bare(literal) => literal,
            Scalar::Quoted(literal) => quote_element(&literal),
        }),
    }
}

/// Double-quote an array element, escaping `\` and `"`.
pub fn quote_element(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn scalar(value: &DefaultValue, kind: &ColumnKind, column_type: &str) -> Result<Scalar, DiffError> {
    let mismatch = || {
        DiffError::unsupported(
            column_type,
            value.kind_name(),
            format!("{} columns do not accept this value", kind),
        )
    };

    let family = kind.family();
    let literal = match (family, value) {
        (ValueFamily::Boolean, DefaultValue::Boolean(b)) => Scalar::Bare(b.to_string()),

        (ValueFamily::Integer | ValueFamily::Float | ValueFamily::Decimal, DefaultValue::Integer(n)) => {
            Scalar::Bare(n.to_string())
        }
        (ValueFamily::Integer | ValueFamily::Float | ValueFamily::Decimal, DefaultValue::BigInt(n)) => {
            Scalar::Bare(n.to_string())
        }
        // Whole floats are accepted for integer columns and render like integers.
        (ValueFamily::Integer, DefaultValue::Float(f)) if f.is_finite() && f.fract() == 0.0 => {
            Scalar::Bare(format!("{f}"))
        }
        (ValueFamily::Float | ValueFamily::Decimal, DefaultValue::Float(f)) => float(*f),
        (ValueFamily::Decimal, DefaultValue::Text(s)) if is_numeric(s) => Scalar::Quoted(s.clone()),

        (ValueFamily::Text, DefaultValue::Text(s)) => Scalar::Quoted(s.clone()),

        (ValueFamily::Date, DefaultValue::Date(d)) => {
            Scalar::Quoted(d.format(DATE_FORMAT).to_string())
        }
        (ValueFamily::Date, DefaultValue::Text(s))
            if NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok() =>
        {
            Scalar::Quoted(s.clone())
        }

        (ValueFamily::Timestamp, DefaultValue::Timestamp(ts)) => {
            Scalar::Quoted(ts.format(TIMESTAMP_FORMAT).to_string())
        }
        (ValueFamily::Timestamp, DefaultValue::Date(d)) => Scalar::Quoted(
            d.and_hms_opt(0, 0, 0)
                .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
                .ok_or_else(mismatch)?,
        ),
        (ValueFamily::Timestamp, DefaultValue::Text(s)) if is_timestamp(s) => {
            Scalar::Quoted(s.clone())
        }

        (ValueFamily::Json, DefaultValue::Json(doc)) => Scalar::Quoted(doc.to_string()),

        (_, DefaultValue::Array(_)) => {
            return Err(DiffError::unsupported(
                column_type,
                "array",
                "array given for a scalar column",
            ));
        }
        _ => return Err(mismatch()),
    };

    Ok(literal)
}

/// Decimal text such as `12.50` or `-1e3`. `NaN` and `Infinity` are valid
/// numeric input too.
fn is_numeric(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && text.parse::<f64>().is_ok()
}

/// ISO date or date-time text, with or without a UTC offset.
fn is_timestamp(text: &str) -> bool {
    let text = text.trim();
    NaiveDate::parse_from_str(text, DATE_FORMAT).is_ok()
        || TIMESTAMP_INPUT_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(text, format).is_ok())
        || TIMESTAMP_INPUT_FORMATS.iter().any(|format| {
            DateTime::parse_from_str(text, &format!("{format}%#z")).is_ok()
        })
        || DateTime::parse_from_rfc3339(text).is_ok()
}

fn float(f: f64) -> Scalar {
    if f.is_nan() {
        Scalar::Quoted("NaN".to_string())
    } else if f.is_infinite() {
        Scalar::Quoted(if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
    } else {
        Scalar::Bare(format!("{f}"))
    }
}
