//! Array column defaults added to an existing table.
//!
//! Every case starts from `test (id serial primary key)` and adds a `values`
//! array column with a default. The diff must be exactly one
//! `alter_table_add_column` carrying the rendered literal.

use crate::helpers::snapshot::{array_column, serial_id, snapshot, table, test_table_pair};
use anyhow::Result;
use chrono::NaiveDate;
use pgsnap::catalog::{Column, ColumnKind, DefaultValue};
use pgsnap::diff::diff_all;
use pgsnap::diff::operations::ChangeStatement;
use rstest::rstest;
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ints(values: &[i64]) -> DefaultValue {
    DefaultValue::array(values.iter().copied().map(DefaultValue::Integer))
}

#[rstest]
#[case::empty_array(
    array_column("values", ColumnKind::Integer, 1, DefaultValue::Array(vec![])),
    "integer[]",
    "'{}'::integer[]"
)]
#[case::integer_array(
    array_column("values", ColumnKind::Integer, 1, ints(&[1, 2, 3])),
    "integer[]",
    "'{1,2,3}'::integer[]"
)]
#[case::bigint_array(
    array_column(
        "values",
        ColumnKind::Bigint,
        1,
        DefaultValue::array((1..=3).map(DefaultValue::BigInt))
    ),
    "bigint[]",
    "'{1,2,3}'::bigint[]"
)]
#[case::boolean_array(
    array_column("values", ColumnKind::Boolean, 1, vec![true, false, true]),
    "boolean[]",
    "'{true,false,true}'::boolean[]"
)]
#[case::multi_dimensional_array(
    array_column(
        "values",
        ColumnKind::Integer,
        2,
        DefaultValue::array([ints(&[1, 2]), ints(&[3, 4])])
    ),
    "integer[][]",
    "'{{1,2},{3,4}}'::integer[][]"
)]
#[case::date_array(
    array_column("values", ColumnKind::Date, 1, vec![date(2024, 8, 6), date(2024, 8, 7)]),
    "date[]",
    r#"'{"2024-08-06","2024-08-07"}'::date[]"#
)]
#[case::timestamp_array(
    array_column(
        "values",
        ColumnKind::Timestamp { precision: None, with_time_zone: false },
        1,
        vec![
            date(2024, 8, 6).and_hms_opt(0, 0, 0).unwrap(),
            date(2024, 8, 7).and_hms_opt(0, 0, 0).unwrap(),
        ]
    ),
    "timestamp[]",
    r#"'{"2024-08-06 00:00:00.000","2024-08-07 00:00:00.000"}'::timestamp[]"#
)]
#[case::json_array(
    array_column("values", ColumnKind::Json, 1, vec![json!({"a": 1}), json!({"b": 2})]),
    "json[]",
    r#"'{"{\"a\":1}","{\"b\":2}"}'::json[]"#
)]
#[case::text_array(
    array_column("values", ColumnKind::Text, 1, vec!["abc", "def"]),
    "text[]",
    r#"'{"abc","def"}'::text[]"#
)]
fn test_array_default_added_column(
    #[case] column: Column,
    #[case] expected_type: &str,
    #[case] expected_default: &str,
) -> Result<()> {
    let (from, to) = test_table_pair(column);

    let statements = diff_all(&from, &to)?;

    assert_eq!(statements.len(), 1, "got {:?}", statements);
    assert_eq!(
        serde_json::to_value(&statements[0])?,
        json!({
            "type": "alter_table_add_column",
            "tableName": "test",
            "schema": "",
            "column": {
                "name": "values",
                "type": expected_type,
                "primaryKey": false,
                "notNull": false,
                "default": expected_default,
            }
        })
    );

    Ok(())
}

/// Escaping inside array elements is backslash based; the surrounding
/// literal doubles single quotes.
#[rstest]
#[case::quote_and_backslash(vec![r#"a"b\c"#], r#"'{"a\"b\\c"}'::text[]"#)]
#[case::single_quote(vec!["it's"], r#"'{"it''s"}'::text[]"#)]
#[case::comma_and_braces(vec!["{x,y}"], r#"'{"{x,y}"}'::text[]"#)]
fn test_text_element_escaping(#[case] values: Vec<&str>, #[case] expected: &str) -> Result<()> {
    let (from, to) = test_table_pair(array_column("values", ColumnKind::Text, 1, values));

    let statements = diff_all(&from, &to)?;
    let [ChangeStatement::AlterTableAddColumn(add)] = statements.as_slice() else {
        panic!("expected a single add column, got {:?}", statements);
    };
    assert_eq!(add.column.default.as_deref(), Some(expected));

    Ok(())
}

#[test]
fn test_three_dimensional_default() -> Result<()> {
    let cube = DefaultValue::array([
        DefaultValue::array([ints(&[1, 2]), ints(&[3, 4])]),
        DefaultValue::array([ints(&[5, 6]), ints(&[7, 8])]),
    ]);
    let (from, to) = test_table_pair(array_column("values", ColumnKind::Smallint, 3, cube));

    let statements = diff_all(&from, &to)?;
    let value = serde_json::to_value(&statements[0])?;
    assert_eq!(value["column"]["type"], json!("smallint[][][]"));
    assert_eq!(
        value["column"]["default"],
        json!("'{{{1,2},{3,4}},{{5,6},{7,8}}}'::smallint[][][]")
    );

    Ok(())
}

#[test]
fn test_null_elements_are_bare() -> Result<()> {
    let values = DefaultValue::array([DefaultValue::text("a"), DefaultValue::Null]);
    let (from, to) = test_table_pair(array_column("values", ColumnKind::Text, 1, values));

    let statements = diff_all(&from, &to)?;
    let value = serde_json::to_value(&statements[0])?;
    assert_eq!(value["column"]["default"], json!(r#"'{"a",NULL}'::text[]"#));

    Ok(())
}

#[test]
fn test_same_literal_in_both_snapshots_is_no_change() -> Result<()> {
    let column = || array_column("values", ColumnKind::Date, 1, vec![date(2024, 8, 6)]);
    let from = snapshot(vec![table("test", vec![serial_id(), column()])]);
    let to = snapshot(vec![table("test", vec![serial_id(), column()])]);

    assert!(diff_all(&from, &to)?.is_empty());

    Ok(())
}
