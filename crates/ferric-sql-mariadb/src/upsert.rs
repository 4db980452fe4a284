//! MariaDB upsert builder.

use tracing::debug;

use ferric_sql_core::context::{DuplicateKeyType, UpsertContext};
use ferric_sql_core::dialect::Dialect;
use ferric_sql_core::expr::{ColumnExpr, Operand};
use ferric_sql_core::statement::{Statement, StatementBuffer};

/// Renders an [`UpsertContext`] with MariaDB syntax.
///
/// The update policy becomes `insert … on duplicate key update` with a
/// `c = values(c)` assignment per non-key column; the ignore policy
/// becomes `insert ignore`.
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
        match self.context.duplicate_key_type() {
            DuplicateKeyType::Update => buf.append("insert into "),
            DuplicateKeyType::Ignore => buf.append("insert ignore into "),
        }
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
        buf.append(")");
        if self.context.duplicate_key_type() == DuplicateKeyType::Update {
            buf.append(" on duplicate key update ");
            for name in self.update_column_names() {
                buf.append(&name);
                buf.append(" = values(");
                buf.append(&name);
                buf.append("), ");
            }
            buf.cut_back(2);
        }
        let statement = buf.into_statement();
        debug!(sql = %statement.to_sql(), "Built upsert statement");
        statement
    }

    fn update_column_names(&self) -> Vec<String> {
        let target = self.context.insert().target();
        let keys = self.context.keys();
        let names: Vec<String> = target
            .properties()
            .iter()
            .filter(|p| p.updatable && !keys.iter().any(|k| k.eq_ignore_ascii_case(&p.column_name)))
            .map(|p| p.canonical_column_name(|s| self.dialect.enquote(s)))
            .collect();
        if names.is_empty() {
            // Key-only tables still need an assignment; refreshing the
            // key is a no-op.
            keys.to_vec()
        } else {
            names
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MariaDbDialect;
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
    fn test_update_policy_refreshes_non_key_columns() {
        let (user, id, name, email) = user();
        let context = insert(&user)
            .values(|v| {
                v.set(&id, 1);
                v.set(&name, "Alice");
                v.set(&email, "alice@example.com");
            })
            .on_duplicate_key_update(&[]);
        let statement = UpsertStatementBuilder::new(&MariaDbDialect::new(), &context).build();
        assert_eq!(
            statement.to_sql(),
            "insert into `user` (id, name, email) values (?, ?, ?) \
             on duplicate key update name = values(name), email = values(email)"
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
    fn test_explicit_keys_narrow_the_update_list() {
        let (user, id, name, email) = user();
        let context = insert(&user)
            .values(|v| {
                v.set(&id, 1);
                v.set(&name, "Alice");
                v.set(&email, "alice@example.com");
            })
            .on_duplicate_key_update(&["email"]);
        let statement = UpsertStatementBuilder::new(&MariaDbDialect::new(), &context).build();
        assert!(statement
            .to_sql()
            .ends_with("on duplicate key update id = values(id), name = values(name)"));
    }

    #[test]
    fn test_ignore_policy_renders_insert_ignore() {
        let (user, id, name, _) = user();
        let context = insert(&user)
            .values(|v| {
                v.set(&id, 1);
                v.set(&name, "Alice");
            })
            .on_duplicate_key_ignore(&[]);
        let statement = UpsertStatementBuilder::new(&MariaDbDialect::new(), &context).build();
        assert_eq!(
            statement.to_sql(),
            "insert ignore into `user` (id, name) values (?, ?)"
        );
    }

    #[test]
    fn test_key_only_tables_refresh_the_key() {
        let mut builder = EntityMetamodel::builder("Tag");
        let id = builder.column(integer("id").id());
        let tag = builder.build();
        let context = insert(&tag)
            .values(|v| v.set(&id, 3))
            .on_duplicate_key_update(&[]);
        let statement = UpsertStatementBuilder::new(&MariaDbDialect::new(), &context).build();
        assert_eq!(
            statement.to_sql(),
            "insert into `tag` (id) values (?) on duplicate key update id = values(id)"
        );
    }
}
