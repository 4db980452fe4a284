//! Update statement builder.

use tracing::debug;

use crate::builder::alias::AliasManager;
use crate::builder::support::BuilderSupport;
use crate::context::UpdateContext;
use crate::dialect::Dialect;
use crate::statement::Statement;

/// Renders an [`UpdateContext`] into a statement.
///
/// The target table carries an alias like a select target, and
/// assignments to read-only columns are skipped.
pub struct UpdateStatementBuilder<'a> {
    context: &'a UpdateContext,
    support: BuilderSupport<'a>,
}

impl<'a> UpdateStatementBuilder<'a> {
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect, context: &'a UpdateContext) -> Self {
        let alias = AliasManager::new(context.target(), &[]);
        Self {
            context,
            support: BuilderSupport::new(dialect, alias),
        }
    }

    /// Builds the statement.
    #[must_use]
    pub fn build(mut self) -> Statement {
        self.support.buf.append("update ");
        self.support.table(self.context.target());
        let assignments: Vec<_> = self
            .context
            .assignments()
            .iter()
            .filter(|(column, _)| column.property().updatable)
            .cloned()
            .collect();
        if !assignments.is_empty() {
            self.support.buf.append(" set ");
            for (column, operand) in &assignments {
                self.support.column(column);
                self.support.buf.append(" = ");
                self.support.operand(operand);
                self.support.buf.append(", ");
            }
            self.support.buf.cut_back(2);
        }
        let criteria = self.context.where_criteria();
        if !criteria.is_empty() {
            self.support.buf.append(" where ");
            self.support.criteria(criteria);
        }
        let statement = self.support.into_statement();
        debug!(sql = %statement.to_sql(), "Built update statement");
        statement
    }
}
