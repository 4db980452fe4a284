//! Delete statement builder.

use tracing::debug;

use crate::builder::alias::AliasManager;
use crate::builder::support::BuilderSupport;
use crate::context::DeleteContext;
use crate::dialect::Dialect;
use crate::statement::Statement;

/// Renders a [`DeleteContext`] into a statement.
pub struct DeleteStatementBuilder<'a> {
    context: &'a DeleteContext,
    support: BuilderSupport<'a>,
}

impl<'a> DeleteStatementBuilder<'a> {
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect, context: &'a DeleteContext) -> Self {
        let alias = AliasManager::new(context.target(), &[]);
        Self {
            context,
            support: BuilderSupport::new(dialect, alias),
        }
    }

    /// Builds the statement.
    #[must_use]
    pub fn build(mut self) -> Statement {
        self.support.buf.append("delete from ");
        self.support.table(self.context.target());
        let criteria = self.context.where_criteria();
        if !criteria.is_empty() {
            self.support.buf.append(" where ");
            self.support.criteria(criteria);
        }
        let statement = self.support.into_statement();
        debug!(sql = %statement.to_sql(), "Built delete statement");
        statement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;
    use crate::dsl::delete;
    use crate::metamodel::{integer, varchar, Column, EntityMetamodel};
    use crate::value::SqlValue;

    fn session() -> (EntityMetamodel, Column<i32>, Column<String>) {
        let mut builder = EntityMetamodel::builder("Session");
        let id = builder.column(integer("id").id());
        let token = builder.column(varchar("token", 64));
        (builder.build(), id, token)
    }

    #[test]
    fn test_delete_with_where() {
        let (session, id, _token) = session();
        let context = delete(&session).where_by(|w| w.eq(&id, 12));
        let statement = DeleteStatementBuilder::new(&GenericDialect::new(), &context).build();
        assert_eq!(
            statement.to_sql(),
            "delete from \"session\" t0_ where t0_.id = ?"
        );
        assert_eq!(statement.args(), vec![&SqlValue::Int(12)]);
    }

    #[test]
    fn test_delete_without_criteria_covers_the_table() {
        let (session, _id, _token) = session();
        let context = delete(&session);
        let statement = DeleteStatementBuilder::new(&GenericDialect::new(), &context).build();
        assert_eq!(statement.to_sql(), "delete from \"session\" t0_");
        assert!(statement.args().is_empty());
    }
}
