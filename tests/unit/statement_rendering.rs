//! SQL rendered from change statements produced by real diffs

use crate::helpers::snapshot::{serial_id, snapshot, table, test_table_pair};
use anyhow::Result;
use insta::assert_snapshot;
use pgsnap::catalog::{
    Column, ColumnKind, DefaultValue, ForeignKey, PrimaryKey, ReferentialAction, Table,
    UniqueConstraint,
};
use pgsnap::diff::diff_all;
use pgsnap::diff::operations::{ChangeStatement, SqlRenderer};
use pgsnap::render::Safety;

fn sql(statements: &[ChangeStatement]) -> String {
    statements
        .iter()
        .flat_map(|s| s.to_sql())
        .map(|r| r.sql)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_add_column_with_array_default() -> Result<()> {
    let (from, to) = test_table_pair(Column {
        dimensions: 1,
        not_null: true,
        default: Some(DefaultValue::array([
            DefaultValue::text("abc"),
            DefaultValue::text("def"),
        ])),
        ..Column::new("values", ColumnKind::Text)
    });

    let statements = diff_all(&from, &to)?;
    assert_snapshot!(sql(&statements), @r#"ALTER TABLE "test" ADD COLUMN "values" text[] DEFAULT '{"abc","def"}'::text[] NOT NULL;"#);

    Ok(())
}

#[test]
fn test_create_table_with_constraints() -> Result<()> {
    let mut memberships = Table::new(
        "app",
        "memberships",
        vec![
            Column {
                not_null: true,
                ..Column::new("user_id", ColumnKind::Integer)
            },
            Column {
                not_null: true,
                ..Column::new("group_id", ColumnKind::Integer)
            },
            Column {
                default: Some(DefaultValue::Expression("now()".to_string())),
                ..Column::new(
                    "joined_at",
                    ColumnKind::Timestamp {
                        precision: Some(3),
                        with_time_zone: true,
                    },
                )
            },
        ],
    );
    memberships.primary_key = Some(PrimaryKey {
        name: "memberships_pkey".to_string(),
        columns: vec!["user_id".to_string(), "group_id".to_string()],
    });
    memberships.unique_constraints.push(UniqueConstraint {
        name: "memberships_group_key".to_string(),
        columns: vec!["group_id".to_string()],
        nulls_not_distinct: true,
    });
    let mut fk = ForeignKey::new("memberships_user_fk", ["user_id"], "app", "users", ["id"]);
    fk.on_delete = Some(ReferentialAction::Cascade);
    memberships.foreign_keys.push(fk);

    let users = Table::new("app", "users", vec![serial_id()]);

    let statements = diff_all(&snapshot(vec![]), &snapshot(vec![memberships, users]))?;
    assert_snapshot!(sql(&statements), @r#"
CREATE SCHEMA "app";
CREATE TABLE "app"."memberships" (
    "user_id" integer NOT NULL,
    "group_id" integer NOT NULL,
    "joined_at" timestamp(3) with time zone DEFAULT now(),
    CONSTRAINT "memberships_pkey" PRIMARY KEY ("user_id", "group_id"),
    CONSTRAINT "memberships_group_key" UNIQUE NULLS NOT DISTINCT ("group_id")
);
CREATE TABLE "app"."users" (
    "id" serial PRIMARY KEY
);
ALTER TABLE "app"."memberships" ADD CONSTRAINT "memberships_user_fk" FOREIGN KEY ("user_id") REFERENCES "app"."users" ("id") ON DELETE CASCADE;
"#);

    Ok(())
}

#[test]
fn test_alter_column_statements() -> Result<()> {
    let old = Column {
        default: Some(DefaultValue::Integer(0)),
        ..Column::new("score", ColumnKind::Integer)
    };
    let new = Column {
        kind: ColumnKind::Numeric {
            precision: Some(10),
            scale: Some(2),
        },
        not_null: true,
        default: Some(DefaultValue::Float(0.5)),
        ..Column::new("score", ColumnKind::Integer)
    };

    let from = snapshot(vec![table("results", vec![serial_id(), old])]);
    let to = snapshot(vec![table("results", vec![serial_id(), new])]);

    let statements = diff_all(&from, &to)?;
    assert_snapshot!(sql(&statements), @r#"
ALTER TABLE "results" ALTER COLUMN "score" SET DATA TYPE numeric(10, 2);
ALTER TABLE "results" ALTER COLUMN "score" SET DEFAULT 0.5;
ALTER TABLE "results" ALTER COLUMN "score" SET NOT NULL;
"#);

    let safety: Vec<Safety> = statements
        .iter()
        .flat_map(|s| s.to_sql())
        .map(|r| r.safety)
        .collect();
    assert_eq!(safety, vec![Safety::Destructive, Safety::Safe, Safety::Safe]);

    Ok(())
}

#[test]
fn test_drop_statements() -> Result<()> {
    let from = snapshot(vec![
        table("sessions", vec![serial_id()]),
        table(
            "users",
            vec![
                serial_id(),
                Column {
                    default: Some(DefaultValue::text("anon")),
                    ..Column::new("nickname", ColumnKind::Varchar { length: Some(32) })
                },
            ],
        ),
    ]);
    let to = snapshot(vec![table("users", vec![serial_id()])]);

    let statements = diff_all(&from, &to)?;
    assert_snapshot!(sql(&statements), @r#"
ALTER TABLE "users" DROP COLUMN IF EXISTS "nickname";
DROP TABLE "sessions";
"#);
    assert!(statements.iter().all(|s| s.is_destructive()));

    Ok(())
}
