//! SQLite upsert builder.

use tracing::debug;

use ferric_sql_core::context::{DuplicateKeyType, UpsertContext};
use ferric_sql_core::dialect::Dialect;
use ferric_sql_core::expr::{ColumnExpr, Operand};
use ferric_sql_core::statement::{Statement, StatementBuffer};

/// Renders an [`UpsertContext`] with SQLite syntax.
///
/// The update policy becomes `insert … on conflict (keys) do update
/// set` with a `c = excluded.c` assignment per non-key column; the
/// ignore policy becomes `do nothing`. An update with no assignable
/// columns also falls back to `do nothing`.
pub struct UpsertStatementBuilder<'a> {
    dialect: &'a dyn Dialect,
    context: &'a UpsertContext,
}

impl<'a> UpsertStatementBuilder<'a> {
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect, context: &'a UpsertContext) -> Self {
        Self { dialect, context }
    }

    /// Builds the statement.
    #[must_use]
    pub fn build(self) -> Statement {
        let insert = self.context.insert();
        let mut buf = StatementBuffer::new();
        buf.append("insert into ");
        buf.append(
            insert
                .target()
                .canonical_table_name(|s| self.dialect.enquote(s)),
        );
        buf.append(" (");
        for (column, _) in insert.assignments() {
            buf.append(
                column
                    .property()
                    .canonical_column_name(|s| self.dialect.enquote(s)),
            );
            buf.append(", ");
        }
        buf.cut_back(2);
        buf.append(") values (");
        for (_, operand) in insert.assignments() {
            match operand {
                Operand::Argument(bound) => buf.bind(bound.clone()),
                Operand::Column(ColumnExpr::Column(column)) => {
                    buf.append(
                        column
                            .property()
                            .canonical_column_name(|s| self.dialect.enquote(s)),
                    );
                }
                _ => buf.append("null"),
            }
            buf.append(", ");
        }
        buf.cut_back(2);
        buf.append(") on conflict (");
        for key in self.context.keys() {
            buf.append(key);
            buf.append(", ");
        }
        buf.cut_back(2);
        buf.append(")");
        match self.context.duplicate_key_type() {
            DuplicateKeyType::Ignore => buf.append(" do nothing"),
            DuplicateKeyType::Update => {
                let names = self.update_column_names();
                if names.is_empty() {
                    buf.append(" do nothing");
                } else {
                    buf.append(" do update set ");
                    for name in names {
                        buf.append(&name);
                        buf.append(" = excluded.");
                        buf.append(&name);
                        buf.append(", ");
                    }
                    buf.cut_back(2);
                }
            }
        }
        let statement = buf.into_statement();
        debug!(sql = %statement.to_sql(), "Built upsert statement");
        statement
    }

    fn update_column_names(&self) -> Vec<String> {
        let target = self.context.insert().target();
        let keys = self.context.keys();
        target
            .properties()
            .iter()
            .filter(|p| p.updatable && !keys.iter().any(|k| k.eq_ignore_ascii_case(&p.column_name)))
            .map(|p| p.canonical_column_name(|s| self.dialect.enquote(s)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::SqliteDialect;
    use ferric_sql_core::dsl::insert;
    use ferric_sql_core::metamodel::{integer, varchar, Column, EntityMetamodel};
    use ferric_sql_core::value::SqlValue;

    fn user() -> (EntityMetamodel, Column<i32>, Column<String>, Column<String>) {
        let mut builder = EntityMetamodel::builder("User");
        let id = builder.column(integer("id").id());
        let name = builder.column(varchar("name", 50));
        let email = builder.column(varchar("email", 100));
        (builder.build(), id, name, email)
    }

    #[test]
    fn test_update_policy_takes_excluded_values() {
        let (user, id, name, email) = user();
        let context = insert(&user)
            .values(|v| {
                v.set(&id, 1);
                v.set(&name, "Alice");
                v.set(&email, "alice@example.com");
            })
            .on_duplicate_key_update(&[]);
        let statement = UpsertStatementBuilder::new(&SqliteDialect::new(), &context).build();
        assert_eq!(
            statement.to_sql(),
            "insert into \"user\" (id, name, email) values (?, ?, ?) \
             on conflict (id) do update set name = excluded.name, email = excluded.email"
        );
        assert_eq!(
            statement.args(),
            vec![
                &SqlValue::Int(1),
                &SqlValue::Text(String::from("Alice")),
                &SqlValue::Text(String::from("alice@example.com")),
            ]
        );
    }

    #[test]
    fn test_ignore_policy_does_nothing() {
        let (user, id, name, _) = user();
        let context = insert(&user)
            .values(|v| {
                v.set(&id, 1);
                v.set(&name, "Alice");
            })
            .on_duplicate_key_ignore(&[]);
        let statement = UpsertStatementBuilder::new(&SqliteDialect::new(), &context).build();
        assert_eq!(
            statement.to_sql(),
            "insert into \"user\" (id, name) values (?, ?) on conflict (id) do nothing"
        );
    }

    #[test]
    fn test_explicit_composite_keys() {
        let mut builder = EntityMetamodel::builder("Grant");
        builder.table("user_role");
        let user_id = builder.column(integer("user_id").id());
        let role_id = builder.column(integer("role_id").id());
        let label = builder.column(varchar("label", 50));
        let grant = builder.build();

        let context = insert(&grant)
            .values(|v| {
                v.set(&user_id, 1);
                v.set(&role_id, 2);
                v.set(&label, "admin");
            })
            .on_duplicate_key_update(&["user_id", "role_id"]);
        let statement = UpsertStatementBuilder::new(&SqliteDialect::new(), &context).build();
        assert_eq!(
            statement.to_sql(),
            "insert into \"user_role\" (user_id, role_id, label) values (?, ?, ?) \
             on conflict (user_id, role_id) do update set label = excluded.label"
        );
    }

    #[test]
    fn test_key_only_update_falls_back_to_do_nothing() {
        let mut builder = EntityMetamodel::builder("Tag");
        let id = builder.column(integer("id").id());
        let tag = builder.build();
        let context = insert(&tag)
            .values(|v| v.set(&id, 3))
            .on_duplicate_key_update(&[]);
        let statement = UpsertStatementBuilder::new(&SqliteDialect::new(), &context).build();
        assert_eq!(
            statement.to_sql(),
            "insert into \"tag\" (id) values (?) on conflict (id) do nothing"
        );
    }
}
