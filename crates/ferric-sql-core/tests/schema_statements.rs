//! DDL generation: create, drop, and catch-up alter statements.

mod common;
use common::*;

use ferric_sql_core::builder::SchemaStatementBuilder;
use ferric_sql_core::dialect::{Dialect, GenericDialect};
use ferric_sql_core::dsl;
use ferric_sql_core::error::SqlError;
use ferric_sql_core::metamodel::{integer, EntityMetamodel, MissingPropertiesStrategy};

struct NoSequenceDialect;

impl Dialect for NoSequenceDialect {
    fn name(&self) -> &'static str {
        "embedded"
    }

    fn supports_sequences(&self) -> bool {
        false
    }
}

fn invoice() -> EntityMetamodel {
    let mut builder = EntityMetamodel::builder("Invoice");
    builder.sequence("invoice_seq", 100, 5);
    let _id = builder.column(integer("id").id());
    builder.build()
}

#[test]
fn create_and_drop_round_trip() {
    let d = department();
    let builder = SchemaStatementBuilder::new(&GenericDialect);

    let create = builder.create(&dsl::create(&[&d.metamodel], false)).unwrap();
    assert_eq!(create.len(), 1);
    assert_eq!(
        create[0].to_sql(),
        r#"create table if not exists "department" (id integer auto_increment not null, name varchar(100) not null, constraint pk_department primary key(id))"#
    );

    let drop = builder.drop(&dsl::drop(&[&d.metamodel])).unwrap();
    assert_eq!(drop.len(), 1);
    assert_eq!(drop[0].to_sql(), r#"drop table if exists "department""#);
}

#[test]
fn sequences_render_after_their_table() {
    let invoice = invoice();
    let builder = SchemaStatementBuilder::new(&GenericDialect);
    let statements = builder.create(&dsl::create(&[&invoice], false)).unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(
        statements[1].to_sql(),
        r#"create sequence if not exists "invoice_seq" start with 100 increment by 5"#
    );
}

#[test]
fn sequences_fail_on_dialects_without_support() {
    let invoice = invoice();
    let builder = SchemaStatementBuilder::new(&NoSequenceDialect);
    let err = builder
        .create(&dsl::create(&[&invoice], false))
        .unwrap_err();
    assert!(matches!(
        err,
        SqlError::Unsupported {
            dialect: "embedded",
            feature: "sequences",
        }
    ));
    assert_eq!(
        err.to_string(),
        "The embedded dialect does not support sequences"
    );
}

#[test]
fn missing_properties_flow_produces_alter_statements() {
    let e = employee();
    let live_columns = vec![String::from("ID"), String::from("NAME")];

    assert!(e.metamodel.should_create_missing_properties(
        &live_columns,
        &[],
        MissingPropertiesStrategy::NameDiff
    ));

    let builder = SchemaStatementBuilder::new(&GenericDialect);
    let statements = builder.create_missing_properties(&e.metamodel, &live_columns, &[]);
    assert_eq!(statements.len(), 1);
    assert_eq!(
        statements[0].to_sql(),
        r#"alter table "employee" ADD COLUMN department_id integer not null, ADD COLUMN salary bigint not null"#
    );
}

#[test]
fn up_to_date_tables_need_no_alter_statements() {
    let e = employee();
    let live_columns = vec![
        String::from("id"),
        String::from("name"),
        String::from("department_id"),
        String::from("salary"),
    ];

    assert!(!e.metamodel.should_create_missing_properties(
        &live_columns,
        &[],
        MissingPropertiesStrategy::NameDiff
    ));

    let builder = SchemaStatementBuilder::new(&GenericDialect);
    let statements = builder.create_missing_properties(&e.metamodel, &live_columns, &[]);
    assert!(statements.is_empty());
}
