//! Two-way templates and raw scripts.

use ferric_sql_core::builder::{ScriptStatementBuilder, TemplateStatementBuilder};
use ferric_sql_core::dsl;
use ferric_sql_core::error::SqlError;
use ferric_sql_core::value::SqlValue;

#[test]
fn bind_markers_replace_their_sample_literals() {
    let context = dsl::template(
        "select * from employee where salary >= /*min_salary*/0 and name like /*pattern*/'x'",
    )
    .bind("min_salary", 1_000i64)
    .bind("pattern", "A%");
    let statement = TemplateStatementBuilder::new(&context).build().unwrap();
    assert_eq!(
        statement.to_sql(),
        "select * from employee where salary >= ? and name like ?"
    );
    assert_eq!(
        statement.args(),
        vec![&SqlValue::Int(1_000), &SqlValue::Text(String::from("A%"))]
    );
}

#[test]
fn plain_comments_pass_through_untouched() {
    let sql = "select /* all columns */ * from employee";
    let context = dsl::template(sql);
    let statement = TemplateStatementBuilder::new(&context).build().unwrap();
    assert_eq!(statement.to_sql(), sql);
    assert!(statement.args().is_empty());
}

#[test]
fn unbound_variables_are_reported_by_name() {
    let context = dsl::template("select /*missing*/0");
    let err = TemplateStatementBuilder::new(&context).build().unwrap_err();
    assert!(matches!(&err, SqlError::UnboundVariable { name } if name == "missing"));
    assert_eq!(
        err.to_string(),
        "The template variable 'missing' is not bound to a value"
    );
}

#[test]
fn scripts_are_kept_verbatim() {
    let sql = "create table t (id integer);\ndrop table t;";
    let context = dsl::script(sql);
    let statement = ScriptStatementBuilder::new(&context).build();
    assert_eq!(statement.to_sql(), sql);
    assert!(statement.args().is_empty());
}
