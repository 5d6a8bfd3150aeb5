//! Typed column default values

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A column default as declared by the schema author, before it is rendered
/// into a SQL literal. Arrays nest to the column's dimensionality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    Null,
    Boolean(bool),
    Integer(i64),
    BigInt(i128),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Json(serde_json::Value),
    /// Raw SQL expression such as `now()`, emitted verbatim.
    Expression(String),
    Array(Vec<DefaultValue>),
}

impl DefaultValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            DefaultValue::Null => "null",
            DefaultValue::Boolean(_) => "boolean",
            DefaultValue::Integer(_) => "integer",
            DefaultValue::BigInt(_) => "big integer",
            DefaultValue::Float(_) => "float",
            DefaultValue::Text(_) => "text",
            DefaultValue::Date(_) => "date",
            DefaultValue::Timestamp(_) => "timestamp",
            DefaultValue::Json(_) => "json",
            DefaultValue::Expression(_) => "expression",
            DefaultValue::Array(_) => "array",
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        DefaultValue::Text(value.into())
    }

    pub fn array(items: impl IntoIterator<Item = DefaultValue>) -> Self {
        DefaultValue::Array(items.into_iter().collect())
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        DefaultValue::Boolean(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        DefaultValue::Integer(value)
    }
}

impl From<i32> for DefaultValue {
    fn from(value: i32) -> Self {
        DefaultValue::Integer(value.into())
    }
}

impl From<i128> for DefaultValue {
    fn from(value: i128) -> Self {
        DefaultValue::BigInt(value)
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        DefaultValue::Float(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::Text(value.to_string())
    }
}

impl From<NaiveDate> for DefaultValue {
    fn from(value: NaiveDate) -> Self {
        DefaultValue::Date(value)
    }
}

impl From<NaiveDateTime> for DefaultValue {
    fn from(value: NaiveDateTime) -> Self {
        DefaultValue::Timestamp(value)
    }
}

impl From<serde_json::Value> for DefaultValue {
    fn from(value: serde_json::Value) -> Self {
        DefaultValue::Json(value)
    }
}

impl<T: Into<DefaultValue>> From<Vec<T>> for DefaultValue {
    fn from(items: Vec<T>) -> Self {
        DefaultValue::Array(items.into_iter().map(Into::into).collect())
    }
}
