//! Whole-snapshot diff behaviour: no-ops, symmetry, ordering and error policy

use crate::helpers::snapshot::{serial_id, snapshot, table};
use anyhow::Result;
use pgsnap::catalog::{
    Column, ColumnKind, DefaultValue, ForeignKey, Snapshot, Table, UniqueConstraint,
};
use pgsnap::diff::operations::ChangeStatement;
use pgsnap::diff::{ErrorPolicy, diff_all, diff_report};
use pgsnap::DiffError;

fn kinds(statements: &[ChangeStatement]) -> Vec<&'static str> {
    statements.iter().map(ChangeStatement::kind).collect()
}

fn with_fk(mut table: Table, column: &str, target: &str) -> Table {
    table.columns.push(Column::new(column, ColumnKind::Integer));
    table.foreign_keys.push(ForeignKey::new(
        format!("{}_{}_fk", table.name, column),
        [column],
        table.schema.clone(),
        target,
        ["id"],
    ));
    table
}

fn blog() -> Snapshot {
    snapshot(vec![
        table("users", vec![serial_id(), Column::new("email", ColumnKind::Text)]),
        with_fk(table("posts", vec![serial_id()]), "author_id", "users"),
        with_fk(table("comments", vec![serial_id()]), "post_id", "posts"),
    ])
}

#[test]
fn test_identical_snapshots_produce_no_statements() -> Result<()> {
    let schema = blog();
    assert!(diff_all(&schema, &schema)?.is_empty());

    let single = snapshot(vec![table("test", vec![serial_id()])]);
    assert!(diff_all(&single, &single.clone())?.is_empty());

    Ok(())
}

#[test]
fn test_adds_and_drops_are_symmetric() -> Result<()> {
    let a = snapshot(vec![table(
        "users",
        vec![serial_id(), Column::new("email", ColumnKind::Text)],
    )]);
    let b = snapshot(vec![table(
        "users",
        vec![
            serial_id(),
            Column::new("email", ColumnKind::Text),
            Column::new("age", ColumnKind::Smallint),
        ],
    )]);

    let forward = diff_all(&a, &b)?;
    let backward = diff_all(&b, &a)?;

    let [ChangeStatement::AlterTableAddColumn(add)] = forward.as_slice() else {
        panic!("expected one add, got {:?}", forward);
    };
    let [ChangeStatement::AlterTableDropColumn(drop)] = backward.as_slice() else {
        panic!("expected one drop, got {:?}", backward);
    };
    assert_eq!(add.column.name, drop.column_name);
    assert_eq!(add.table, drop.table);

    Ok(())
}

#[test]
fn test_tables_created_before_references() -> Result<()> {
    let statements = diff_all(&Snapshot::empty(), &blog())?;

    assert_eq!(
        kinds(&statements),
        vec![
            "create_table",
            "create_table",
            "create_table",
            "create_reference",
            "create_reference",
        ]
    );

    Ok(())
}

#[test]
fn test_referencing_tables_dropped_first() -> Result<()> {
    let statements = diff_all(&blog(), &Snapshot::empty())?;

    let dropped: Vec<_> = statements
        .iter()
        .map(|s| match s {
            ChangeStatement::DropTable(t) => t.table_name.clone(),
            other => panic!("unexpected {:?}", other),
        })
        .collect();
    assert_eq!(dropped, vec!["comments", "posts", "users"]);

    Ok(())
}

#[test]
fn test_creates_then_alterations_then_drops() -> Result<()> {
    let from = snapshot(vec![
        table("legacy", vec![serial_id()]),
        table("users", vec![serial_id()]),
    ]);
    let to = snapshot(vec![
        table(
            "users",
            vec![serial_id(), Column::new("email", ColumnKind::Text)],
        ),
        table("accounts", vec![serial_id()]),
    ]);

    let statements = diff_all(&from, &to)?;
    assert_eq!(
        kinds(&statements),
        vec!["create_table", "alter_table_add_column", "drop_table"]
    );

    Ok(())
}

#[test]
fn test_schema_namespaces() -> Result<()> {
    let from = snapshot(vec![Table::new("audit", "events", vec![serial_id()])]);
    let to = snapshot(vec![Table::new("app", "users", vec![serial_id()])]);

    let statements = diff_all(&from, &to)?;
    assert_eq!(
        kinds(&statements),
        vec!["create_schema", "create_table", "drop_table", "drop_schema"]
    );

    Ok(())
}

#[test]
fn test_ambiguous_rename_is_a_notice() -> Result<()> {
    let from = snapshot(vec![table(
        "users",
        vec![serial_id(), Column::new("name", ColumnKind::Text)],
    )]);
    let to = snapshot(vec![table(
        "users",
        vec![
            serial_id(),
            Column::new("full_name", ColumnKind::Varchar { length: Some(100) }),
        ],
    )]);

    let report = diff_report(&from, &to);
    assert_eq!(report.notices.len(), 1);
    assert!(report.notices[0].is_notice());
    assert!(report.skipped.is_empty());
    assert_eq!(
        kinds(&report.statements),
        vec!["alter_table_add_column", "alter_table_drop_column"]
    );

    // notices never block the diff
    assert_eq!(report.into_statements(ErrorPolicy::Abort)?.len(), 2);

    Ok(())
}

#[test]
fn test_abort_and_skip_policies() -> Result<()> {
    let from = snapshot(vec![table("events", vec![serial_id()])]);
    let to = snapshot(vec![table(
        "events",
        vec![
            serial_id(),
            Column {
                default: Some(DefaultValue::text("2024-09-01")),
                ..Column::new("starts_on", ColumnKind::Date)
            },
            Column {
                default: Some(DefaultValue::array([DefaultValue::Integer(1)])),
                ..Column::new("priority", ColumnKind::Integer)
            },
            Column::new("title", ColumnKind::Text),
        ],
    )]);

    let err = diff_all(&from, &to).unwrap_err();
    let DiffError::InvalidColumn { table, column, .. } = &err else {
        panic!("expected an invalid column error, got {:?}", err);
    };
    assert_eq!(table, "events");
    assert_eq!(column, "priority");

    let report = diff_report(&from, &to);
    assert_eq!(report.skipped.len(), 1);

    let statements = report.into_statements(ErrorPolicy::Skip)?;
    let added: Vec<_> = statements
        .iter()
        .map(|s| match s {
            ChangeStatement::AlterTableAddColumn(add) => add.column.name.as_str(),
            other => panic!("unexpected {:?}", other),
        })
        .collect();
    assert_eq!(added, vec!["starts_on", "title"]);

    Ok(())
}

#[test]
fn test_changed_foreign_key_is_recreated() -> Result<()> {
    let from = blog();
    let mut tables = from.tables().to_vec();
    for t in &mut tables {
        for fk in &mut t.foreign_keys {
            fk.on_delete = Some(pgsnap::catalog::ReferentialAction::Cascade);
        }
    }
    let to = snapshot(tables);

    let statements = diff_all(&from, &to)?;
    assert_eq!(
        kinds(&statements),
        vec![
            "delete_reference",
            "delete_reference",
            "create_reference",
            "create_reference",
        ]
    );

    Ok(())
}

#[test]
fn test_public_and_unqualified_tables_are_the_same() -> Result<()> {
    let unqualified = snapshot(vec![
        with_fk(table("posts", vec![serial_id()]), "author_id", "users"),
        table("users", vec![serial_id()]),
    ]);
    let mut posts = Table::new("public", "posts", vec![serial_id()]);
    posts.columns.push(Column::new("author_id", ColumnKind::Integer));
    posts.foreign_keys.push(ForeignKey::new(
        "posts_author_id_fk",
        ["author_id"],
        "public",
        "users",
        ["id"],
    ));
    let qualified = snapshot(vec![posts, Table::new("public", "users", vec![serial_id()])]);

    assert!(diff_all(&unqualified, &qualified)?.is_empty());
    assert!(diff_all(&qualified, &unqualified)?.is_empty());

    Ok(())
}

fn referenced_by_posts(mut users: Table, with_unique: bool) -> Snapshot {
    users.columns.push(Column::new("uid", ColumnKind::Integer));
    if with_unique {
        users.unique_constraints.push(UniqueConstraint {
            name: "a_users_uid_key".to_string(),
            columns: vec!["uid".to_string()],
            nulls_not_distinct: false,
        });
    }
    let mut posts = table(
        "b_posts",
        vec![serial_id(), Column::new("author_uid", ColumnKind::Integer)],
    );
    posts.foreign_keys.push(ForeignKey::new(
        "posts_author_fk",
        ["author_uid"],
        "",
        "a_users",
        ["uid"],
    ));
    snapshot(vec![users, posts])
}

#[test]
fn test_references_removed_before_their_columns_change() -> Result<()> {
    let without_uid = snapshot(vec![
        table("a_users", vec![serial_id()]),
        table(
            "b_posts",
            vec![serial_id(), Column::new("author_uid", ColumnKind::Integer)],
        ),
    ]);

    let statements = diff_all(
        &referenced_by_posts(table("a_users", vec![serial_id()]), false),
        &without_uid,
    )?;
    assert_eq!(
        kinds(&statements),
        vec!["delete_reference", "alter_table_drop_column"]
    );

    let statements = diff_all(
        &referenced_by_posts(table("a_users", vec![serial_id()]), true),
        &without_uid,
    )?;
    assert_eq!(
        kinds(&statements),
        vec![
            "delete_reference",
            "delete_unique_constraint",
            "alter_table_drop_column"
        ]
    );

    let retyped = table(
        "a_users",
        vec![serial_id(), Column::new("uid", ColumnKind::Bigint)],
    );
    let statements = diff_all(
        &referenced_by_posts(table("a_users", vec![serial_id()]), false),
        &snapshot(vec![
            retyped,
            table(
                "b_posts",
                vec![serial_id(), Column::new("author_uid", ColumnKind::Integer)],
            ),
        ]),
    )?;
    assert_eq!(
        kinds(&statements),
        vec!["delete_reference", "alter_table_alter_column_set_type"]
    );

    Ok(())
}
