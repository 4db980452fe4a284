//! Set-operation statement builder.

use tracing::debug;

use crate::builder::select::SelectStatementBuilder;
use crate::context::{SetOperationComponent, SetOperationContext};
use crate::dialect::Dialect;
use crate::statement::{Statement, StatementBuffer};

/// Renders a [`SetOperationContext`] into a statement.
///
/// Each leaf select renders with its own alias numbering, and ordering
/// is positional over the combined result.
pub struct SetOperationStatementBuilder<'a> {
    dialect: &'a dyn Dialect,
    context: &'a SetOperationContext,
}

impl<'a> SetOperationStatementBuilder<'a> {
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect, context: &'a SetOperationContext) -> Self {
        Self { dialect, context }
    }

    /// Builds the statement.
    #[must_use]
    pub fn build(self) -> Statement {
        let mut buf = StatementBuffer::new();
        self.component(&mut buf, self.context.component());
        let items = self.context.order_by_items();
        if !items.is_empty() {
            buf.append(" order by ");
            for (position, order) in items {
                buf.append(format!("{position} {}, ", order.as_sql()));
            }
            buf.cut_back(2);
        }
        let statement = buf.into_statement();
        debug!(sql = %statement.to_sql(), "Built set operation statement");
        statement
    }

    fn component(&self, buf: &mut StatementBuffer, component: &SetOperationComponent) {
        match component {
            SetOperationComponent::Leaf(select) => {
                let statement = SelectStatementBuilder::new(self.dialect, select).build();
                buf.append_statement(&statement);
            }
            SetOperationComponent::Composite { kind, left, right } => {
                self.component(buf, left);
                buf.append(format!(" {} ", kind.as_sql()));
                self.component(buf, right);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;
    use crate::dsl::from;
    use crate::expr::SortOrder;
    use crate::metamodel::{integer, varchar, Column, EntityMetamodel};
    use crate::value::SqlValue;

    fn person(entity: &str) -> (EntityMetamodel, Column<i32>, Column<String>) {
        let mut builder = EntityMetamodel::builder(entity);
        let id = builder.column(integer("id").id());
        let name = builder.column(varchar("name", 50));
        (builder.build(), id, name)
    }

    #[test]
    fn test_union_gives_each_leaf_fresh_aliases() {
        let (employee, e_id, _) = person("Employee");
        let (manager, m_id, _) = person("Manager");
        let context = from(&employee)
            .select(&[&e_id])
            .union(&from(&manager).select(&[&m_id]));
        let statement =
            SetOperationStatementBuilder::new(&GenericDialect::new(), &context).build();
        assert_eq!(
            statement.to_sql(),
            "select t0_.id from \"employee\" t0_ union select t0_.id from \"manager\" t0_"
        );
    }

    #[test]
    fn test_chained_operations_and_positional_order() {
        let (employee, e_id, e_name) = person("Employee");
        let (manager, m_id, m_name) = person("Manager");
        let employees = from(&employee)
            .select(&[&e_id, &e_name])
            .where_by(|w| w.greater(&e_id, 10));
        let managers = from(&manager).select(&[&m_id, &m_name]);
        let context = employees
            .union_all(&managers)
            .order_by(&[(1, SortOrder::Asc), (2, SortOrder::Desc)]);
        let statement =
            SetOperationStatementBuilder::new(&GenericDialect::new(), &context).build();
        assert_eq!(
            statement.to_sql(),
            "select t0_.id, t0_.name from \"employee\" t0_ where t0_.id > ? \
             union all \
             select t0_.id, t0_.name from \"manager\" t0_ \
             order by 1 asc, 2 desc"
        );
        assert_eq!(statement.args(), vec![&SqlValue::Int(10)]);
    }

    #[test]
    fn test_except_after_union_nests_to_the_left() {
        let (a, a_id, _) = person("A");
        let (b, b_id, _) = person("B");
        let (c, c_id, _) = person("C");
        let context = from(&a)
            .select(&[&a_id])
            .union(&from(&b).select(&[&b_id]))
            .except(&from(&c).select(&[&c_id]));
        let statement =
            SetOperationStatementBuilder::new(&GenericDialect::new(), &context).build();
        assert_eq!(
            statement.to_sql(),
            "select t0_.id from \"a\" t0_ union select t0_.id from \"b\" t0_ \
             except select t0_.id from \"c\" t0_"
        );
    }
}
