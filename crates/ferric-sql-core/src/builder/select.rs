//! Select statement builder.

use tracing::debug;

use crate::builder::alias::AliasManager;
use crate::builder::support::BuilderSupport;
use crate::context::{JoinKind, Projection, SelectContext};
use crate::dialect::Dialect;
use crate::expr::ColumnExpr;
use crate::statement::Statement;

/// Renders a [`SelectContext`] into a statement.
///
/// Clauses appear in a fixed order: `select`, `from` with joins,
/// `where`, `group by`, `having`, `order by`, pagination, `for update`.
/// When no `group by` columns were given but the projection mixes
/// aggregate and plain columns, the plain columns become the `group by`
/// clause.
pub struct SelectStatementBuilder<'a> {
    dialect: &'a dyn Dialect,
    context: &'a SelectContext,
    support: BuilderSupport<'a>,
}

impl<'a> SelectStatementBuilder<'a> {
    #[must_use]
    pub fn new(dialect: &'a dyn Dialect, context: &'a SelectContext) -> Self {
        let alias = AliasManager::new(context.target(), context.joins());
        Self::with_alias(dialect, context, alias)
    }

    pub(crate) fn with_alias(
        dialect: &'a dyn Dialect,
        context: &'a SelectContext,
        alias: AliasManager<'a>,
    ) -> Self {
        Self {
            dialect,
            context,
            support: BuilderSupport::new(dialect, alias),
        }
    }

    /// Builds the statement.
    ///
    /// # Panics
    ///
    /// Panics when a criterion or projection references an entity that
    /// is neither the target nor joined.
    #[must_use]
    pub fn build(mut self) -> Statement {
        self.select_clause();
        self.from_clause();
        self.where_clause();
        self.group_by_clause();
        self.having_clause();
        self.order_by_clause();
        self.offset_limit_clause();
        self.for_update_clause();
        let statement = self.support.into_statement();
        debug!(sql = %statement.to_sql(), "Built select statement");
        statement
    }

    fn select_clause(&mut self) {
        self.support.buf.append("select ");
        if self.context.is_distinct() {
            self.support.buf.append("distinct ");
        }
        let columns = self.projection_columns();
        for expr in &columns {
            self.support.column_expr(expr);
            self.support.buf.append(", ");
        }
        self.support.buf.cut_back(2);
    }

    fn from_clause(&mut self) {
        self.support.buf.append(" from ");
        self.support.table(self.context.target());
        for join in self.context.joins() {
            match join.kind {
                JoinKind::Inner => self.support.buf.append(" inner join "),
                JoinKind::LeftOuter => self.support.buf.append(" left outer join "),
            }
            self.support.table(&join.target);
            if !join.criteria.is_empty() {
                self.support.buf.append(" on (");
                self.support.criteria(&join.criteria);
                self.support.buf.append(")");
            }
        }
    }

    fn where_clause(&mut self) {
        let criteria = self.context.where_criteria();
        if !criteria.is_empty() {
            self.support.buf.append(" where ");
            self.support.criteria(criteria);
        }
    }

    fn group_by_clause(&mut self) {
        let explicit = self.context.group_by_columns();
        if explicit.is_empty() {
            let columns = self.projection_columns();
            let has_aggregate = columns.iter().any(ColumnExpr::is_aggregate);
            let plain: Vec<_> = columns
                .iter()
                .filter_map(|expr| match expr {
                    ColumnExpr::Column(column) => Some(column.clone()),
                    _ => None,
                })
                .collect();
            if has_aggregate && !plain.is_empty() {
                self.support.buf.append(" group by ");
                for column in &plain {
                    self.support.column(column);
                    self.support.buf.append(", ");
                }
                self.support.buf.cut_back(2);
            }
        } else {
            self.support.buf.append(" group by ");
            let columns = explicit.to_vec();
            for column in &columns {
                self.support.column(column);
                self.support.buf.append(", ");
            }
            self.support.buf.cut_back(2);
        }
    }

    fn having_clause(&mut self) {
        let criteria = self.context.having_criteria();
        if !criteria.is_empty() {
            self.support.buf.append(" having ");
            self.support.criteria(criteria);
        }
    }

    fn order_by_clause(&mut self) {
        let items = self.context.order_by_items();
        if !items.is_empty() {
            self.support.buf.append(" order by ");
            for item in items {
                self.support.sort_item(item);
                self.support.buf.append(", ");
            }
            self.support.buf.cut_back(2);
        }
    }

    fn offset_limit_clause(&mut self) {
        let fragment = self
            .dialect
            .offset_limit(self.context.offset_rows(), self.context.limit_rows());
        self.support.buf.append(fragment);
    }

    fn for_update_clause(&mut self) {
        if self.context.is_for_update() {
            self.support.buf.append(" for update");
        }
    }

    /// The projection as expressions, falling back to the target's
    /// columns when an empty expression list was given.
    fn projection_columns(&self) -> Vec<ColumnExpr> {
        match self.context.projection() {
            Projection::Entities(metamodels) => metamodels
                .iter()
                .flat_map(|m| m.columns().into_iter().map(ColumnExpr::Column))
                .collect(),
            Projection::Expressions(expressions) if expressions.is_empty() => self
                .context
                .target()
                .columns()
                .into_iter()
                .map(ColumnExpr::Column)
                .collect(),
            Projection::Expressions(expressions) => expressions.clone(),
        }
    }
}
