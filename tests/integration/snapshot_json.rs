//! Snapshots as read by the CLI: JSON in, validated model out

use anyhow::Result;
use pgsnap::catalog::{ColumnKind, DefaultValue, Snapshot};
use pgsnap::diff::diff_all;
use serde_json::json;

#[test]
fn test_snapshot_from_json() -> Result<()> {
    let snapshot: Snapshot = serde_json::from_value(json!({
        "tables": [{
            "name": "test",
            "columns": [
                { "name": "id", "type": "serial", "primaryKey": true, "notNull": true },
                {
                    "name": "values",
                    "type": "int4",
                    "dimensions": 2,
                    "default": { "kind": "array", "value": [
                        { "kind": "array", "value": [
                            { "kind": "integer", "value": 1 },
                            { "kind": "integer", "value": 2 }
                        ]},
                        { "kind": "array", "value": [
                            { "kind": "integer", "value": 3 },
                            { "kind": "integer", "value": 4 }
                        ]}
                    ]}
                },
                {
                    "name": "created_at",
                    "type": "timestamptz",
                    "default": { "kind": "expression", "value": "now()" }
                }
            ]
        }]
    }))?;

    let table = snapshot.table("", "test").unwrap();
    let values = table.column("values").unwrap();
    assert_eq!(values.kind, ColumnKind::Integer);
    assert_eq!(values.data_type(), "integer[][]");
    assert_eq!(
        values.rendered_default()?.as_deref(),
        Some("'{{1,2},{3,4}}'::integer[][]")
    );
    assert_eq!(
        table.column("created_at").unwrap().default,
        Some(DefaultValue::Expression("now()".to_string()))
    );

    let statements = diff_all(&Snapshot::empty(), &snapshot)?;
    assert_eq!(statements.len(), 1);

    Ok(())
}

#[test]
fn test_snapshot_round_trips_through_json() -> Result<()> {
    let original: Snapshot = serde_json::from_value(json!({
        "tables": [{
            "schema": "app",
            "name": "events",
            "columns": [
                { "name": "on", "type": "date", "default": { "kind": "date", "value": "2024-08-06" } },
                { "name": "meta", "type": "jsonb", "default": { "kind": "json", "value": {"a": [1, 2]} } }
            ],
            "uniqueConstraints": [{ "name": "events_on_key", "columns": ["on"] }]
        }]
    }))?;

    let reread: Snapshot = serde_json::from_str(&serde_json::to_string(&original)?)?;
    assert_eq!(reread, original);
    assert!(diff_all(&original, &reread)?.is_empty());

    Ok(())
}

#[test]
fn test_duplicate_tables_are_rejected() {
    let err = serde_json::from_value::<Snapshot>(json!({
        "tables": [
            { "name": "users", "columns": [] },
            { "name": "users", "columns": [] }
        ]
    }))
    .unwrap_err();
    assert!(err.to_string().contains("users appears more than once"));
}

#[test]
fn test_duplicate_columns_are_rejected() {
    let err = serde_json::from_value::<Snapshot>(json!({
        "tables": [{
            "name": "users",
            "columns": [
                { "name": "id", "type": "integer" },
                { "name": "id", "type": "bigint" }
            ]
        }]
    }))
    .unwrap_err();
    assert!(err.to_string().contains("column id appears more than once"));
}

#[test]
fn test_unknown_type_is_rejected() {
    let err = serde_json::from_value::<Snapshot>(json!({
        "tables": [{ "name": "users", "columns": [{ "name": "balance", "type": "money" }] }]
    }))
    .unwrap_err();
    assert!(err.to_string().contains("unknown column type 'money'"));
}
