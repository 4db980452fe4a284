//! INSERT, UPDATE, and DELETE rendering, including masked debug SQL.

mod common;
use common::*;

use ferric_sql_core::dsl;
use ferric_sql_core::metamodel::{integer, varchar, Column, EntityMetamodel};
use ferric_sql_core::value::SqlValue;

struct Account {
    metamodel: EntityMetamodel,
    id: Column<i32>,
    password: Column<String>,
    created_by: Column<String>,
}

fn account() -> Account {
    let mut builder = EntityMetamodel::builder("Account");
    let id = builder.column(integer("id").id());
    let password = builder.column(varchar("password", 100).masked());
    let created_by = builder.column(varchar("created_by", 50).read_only());
    Account {
        metamodel: builder.build(),
        id,
        password,
        created_by,
    }
}

#[test]
fn insert_binds_every_assigned_column() {
    let e = employee();
    let context = dsl::insert(&e.metamodel).values(|v| {
        v.set(&e.id, 1);
        v.set(&e.name, "Alice");
        v.set(&e.department_id, 2);
        v.set(&e.salary, 3_000i64);
    });
    let statement = build_insert(&context);
    assert_eq!(
        statement.to_sql(),
        r#"insert into "employee" (id, name, department_id, salary) values (?, ?, ?, ?)"#
    );
    assert_eq!(
        statement.args(),
        vec![
            &SqlValue::Int(1),
            &SqlValue::Text(String::from("Alice")),
            &SqlValue::Int(2),
            &SqlValue::Int(3_000),
        ]
    );
}

#[test]
fn insert_from_select_lists_the_target_columns() {
    let e = employee();
    let mut builder = EntityMetamodel::builder("EmployeeArchive");
    builder.table("employee_archive");
    let _id = builder.column(integer("id").id());
    let _name = builder.column(varchar("name", 100));
    let archive = builder.build();

    let source = dsl::from(&e.metamodel)
        .select(&[&e.id, &e.name])
        .where_by(|w| w.less(&e.salary, 500i64));
    let context = dsl::insert(&archive).from_select(&source);
    let statement = build_insert(&context);
    assert_eq!(
        statement.to_sql(),
        r#"insert into "employee_archive" (id, name) select t0_.id, t0_.name from "employee" t0_ where t0_.salary < ?"#
    );
}

#[test]
fn update_skips_read_only_columns() {
    let a = account();
    let context = dsl::update(&a.metamodel).set(|s| {
        s.set(&a.password, "x");
        s.set(&a.created_by, "admin");
    });
    let statement = build_update(&context);
    assert_eq!(
        statement.to_sql(),
        r#"update "account" t0_ set t0_.password = ?"#
    );
    assert_eq!(statement.args(), vec![&SqlValue::Text(String::from("x"))]);
}

#[test]
fn masked_assignments_hide_in_debug_sql() {
    let a = account();
    let context = dsl::update(&a.metamodel)
        .set(|s| s.set(&a.password, "hunter2"))
        .where_by(|w| w.eq(&a.id, 42));
    let statement = build_update(&context);
    assert_eq!(
        statement.to_sql(),
        r#"update "account" t0_ set t0_.password = ? where t0_.id = ?"#
    );
    assert_eq!(
        statement.to_debug_sql(),
        r#"update "account" t0_ set t0_.password = ***** where t0_.id = 42"#
    );
    assert_eq!(
        statement.args(),
        vec![&SqlValue::Text(String::from("hunter2")), &SqlValue::Int(42)]
    );
}

#[test]
fn masked_filters_hide_in_debug_sql() {
    let a = account();
    let context = dsl::from(&a.metamodel).where_by(|w| w.eq(&a.password, "hunter2"));
    let statement = build_select(&context);
    assert!(statement
        .to_debug_sql()
        .ends_with("where t0_.password = *****"));
}

#[test]
fn delete_is_scoped_by_criteria() {
    let e = employee();
    let context = dsl::delete(&e.metamodel).where_by(|w| w.eq(&e.id, 9));
    let statement = build_delete(&context);
    assert_eq!(
        statement.to_sql(),
        r#"delete from "employee" t0_ where t0_.id = ?"#
    );
    assert_eq!(statement.args(), vec![&SqlValue::Int(9)]);
}
