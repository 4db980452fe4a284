//! Insert statement builder.

use tracing::debug;

use crate::builder::select::SelectStatementBuilder;
use crate::context::InsertContext;
use crate::dialect::Dialect;
use crate::expr::{ColumnExpr, Operand};
use crate::statement::{Statement, StatementBuffer};

/// Renders an [`InsertContext`] into a statement.
///
/// The inserted-into table and its columns render without aliases.
/// With a select source, the column list covers every property of the
/// target and the query supplies the rows.
pub struct InsertStatementBuilder<'a> {
    dialect: &'a dyn Dialect,
    context: &'a InsertContext,
}

impl<'a> InsertStatementBuilder<'a> {
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect, context: &'a InsertContext) -> Self {
        Self { dialect, context }
    }

    /// Builds the statement.
    #[must_use]
    pub fn build(self) -> Statement {
        let mut buf = StatementBuffer::new();
        buf.append("insert into ");
        buf.append(
            self.context
                .target()
                .canonical_table_name(|s| self.dialect.enquote(s)),
        );
        if let Some(select) = self.context.select_source() {
            buf.append(" (");
            for property in self.context.target().properties() {
                buf.append(property.canonical_column_name(|s| self.dialect.enquote(s)));
                buf.append(", ");
            }
            buf.cut_back(2);
            buf.append(") ");
            let statement = SelectStatementBuilder::new(self.dialect, select).build();
            buf.append_statement(&statement);
        } else {
            buf.append(" (");
            for (column, _) in self.context.assignments() {
                buf.append(column.property().canonical_column_name(|s| self.dialect.enquote(s)));
                buf.append(", ");
            }
            buf.cut_back(2);
            buf.append(") values (");
            for (_, operand) in self.context.assignments() {
                self.value(&mut buf, operand);
                buf.append(", ");
            }
            buf.cut_back(2);
            buf.append(")");
        }
        let statement = buf.into_statement();
        debug!(sql = %statement.to_sql(), "Built insert statement");
        statement
    }

    fn value(&self, buf: &mut StatementBuffer, operand: &Operand) {
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
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;
    use crate::dsl::{from, insert};
    use crate::metamodel::{integer, varchar, Column, EntityMetamodel};
    use crate::value::SqlValue;

    fn customer() -> (EntityMetamodel, Column<i32>, Column<String>) {
        let mut builder = EntityMetamodel::builder("Customer");
        let id = builder.column(integer("id").id());
        let name = builder.column(varchar("name", 50));
        (builder.build(), id, name)
    }

    #[test]
    fn test_insert_values() {
        let (customer, id, name) = customer();
        let context = insert(&customer).values(|v| {
            v.set(&id, 7);
            v.set(&name, "Ada");
        });
        let statement = InsertStatementBuilder::new(&GenericDialect::new(), &context).build();
        assert_eq!(
            statement.to_sql(),
            "insert into \"customer\" (id, name) values (?, ?)"
        );
        assert_eq!(
            statement.args(),
            vec![&SqlValue::Int(7), &SqlValue::Text(String::from("Ada"))]
        );
    }

    #[test]
    fn test_insert_null_for_none() {
        let (customer, id, name) = customer();
        let context = insert(&customer).values(|v| {
            v.set(&id, 7);
            v.set(&name, None::<&str>);
        });
        let statement = InsertStatementBuilder::new(&GenericDialect::new(), &context).build();
        assert_eq!(statement.args(), vec![&SqlValue::Int(7), &SqlValue::Null]);
    }

    #[test]
    fn test_insert_from_select_lists_every_column() {
        let (customer, id, name) = customer();
        let mut builder = EntityMetamodel::builder("Archive");
        let _archive_id = builder.column(integer("id").id());
        let _archive_name = builder.column(varchar("name", 50));
        let archive = builder.build();

        let source = from(&customer)
            .select(&[&id, &name])
            .where_by(|w| w.less(&id, 100));
        let context = insert(&archive).from_select(&source);
        let statement = InsertStatementBuilder::new(&GenericDialect::new(), &context).build();
        assert_eq!(
            statement.to_sql(),
            "insert into \"archive\" (id, name) \
             select t0_.id, t0_.name from \"customer\" t0_ where t0_.id < ?"
        );
    }
}
