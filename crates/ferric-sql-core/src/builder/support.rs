//! Shared rendering helpers for the statement builders.

use crate::builder::alias::AliasManager;
use crate::builder::select::SelectStatementBuilder;
use crate::context::SelectContext;
use crate::dialect::Dialect;
use crate::expr::{ColumnExpr, Criterion, Operand, SortItem};
use crate::metamodel::{ColumnRef, EntityMetamodel};
use crate::statement::{BoundValue, Statement, StatementBuffer};
use crate::value::SqlValue;

/// Renders columns, operands, and criteria into a statement buffer on
/// behalf of a statement builder.
///
/// The support owns the buffer; builders drive it clause by clause and
/// take the finished [`Statement`] out with
/// [`into_statement`](Self::into_statement).
pub(crate) struct BuilderSupport<'a> {
    dialect: &'a dyn Dialect,
    alias: AliasManager<'a>,
    pub(crate) buf: StatementBuffer,
}

impl<'a> BuilderSupport<'a> {
    pub(crate) fn new(dialect: &'a dyn Dialect, alias: AliasManager<'a>) -> Self {
        Self {
            dialect,
            alias,
            buf: StatementBuffer::new(),
        }
    }

    pub(crate) fn into_statement(self) -> Statement {
        self.buf.into_statement()
    }

    /// Appends the canonical table name followed by its alias.
    ///
    /// # Panics
    ///
    /// Panics if the metamodel was never registered with the alias
    /// manager.
    pub(crate) fn table(&mut self, metamodel: &EntityMetamodel) {
        let name = metamodel.canonical_table_name(|s| self.dialect.enquote(s));
        let alias = self
            .alias
            .alias(metamodel.id())
            .unwrap_or_else(|| panic!("Alias is not found. entity={}", metamodel.entity_name()));
        self.buf.append(format!("{name} {alias}"));
    }

    /// Appends an alias-qualified canonical column name.
    ///
    /// # Panics
    ///
    /// Panics if the owning metamodel was never registered with the
    /// alias manager.
    pub(crate) fn column(&mut self, column: &ColumnRef) {
        let name = column.canonical_column_name(|s| self.dialect.enquote(s));
        let alias = self
            .alias
            .alias(column.owner_id())
            .unwrap_or_else(|| panic!("Alias is not found. entity={}", column.owner_entity()));
        self.buf.append(format!("{alias}.{name}"));
    }

    /// Appends a projection expression, wrapping aggregate functions
    /// around their column.
    pub(crate) fn column_expr(&mut self, expr: &ColumnExpr) {
        match expr {
            ColumnExpr::Column(column) => self.column(column),
            ColumnExpr::CountStar => self.buf.append("count(*)"),
            ColumnExpr::Count(column) => self.aggregate("count", column),
            ColumnExpr::Sum(column) => self.aggregate("sum", column),
            ColumnExpr::Avg(column) => self.aggregate("avg", column),
            ColumnExpr::Max(column) => self.aggregate("max", column),
            ColumnExpr::Min(column) => self.aggregate("min", column),
        }
    }

    fn aggregate(&mut self, function: &str, column: &ColumnRef) {
        self.buf.append(format!("{function}("));
        self.column(column);
        self.buf.append(")");
    }

    pub(crate) fn sort_item(&mut self, item: &SortItem) {
        self.column(&item.column);
        self.buf.append(format!(" {}", item.order.as_sql()));
    }

    /// Binds a value as a placeholder, masking it in debug output when
    /// the column opted in.
    pub(crate) fn bind(&mut self, column: &ColumnRef, value: SqlValue) {
        let bound = if column.property().masking {
            BoundValue::masked(value)
        } else {
            BoundValue::new(value)
        };
        self.buf.bind(bound);
    }

    pub(crate) fn operand(&mut self, operand: &Operand) {
        match operand {
            Operand::Column(expr) => self.column_expr(expr),
            Operand::Argument(bound) => self.buf.bind(bound.clone()),
            Operand::Escape(column, like) => {
                self.bind(column, SqlValue::Text(like.pattern().to_owned()));
                if like.is_escaped() {
                    self.buf.append(format!(" escape '{}'", like.escape()));
                }
            }
            Operand::Subquery(context) => {
                self.buf.append("(");
                let statement = self.subquery(context);
                self.buf.append_statement(&statement);
                self.buf.append(")");
            }
        }
    }

    fn subquery(&self, context: &SelectContext) -> Statement {
        let alias = AliasManager::child(context.target(), context.joins(), &self.alias);
        SelectStatementBuilder::with_alias(self.dialect, context, alias).build()
    }

    /// Renders a criteria list joined by ` and `.
    ///
    /// Must not be called with an empty list; clause renderers check
    /// for emptiness first.
    pub(crate) fn criteria(&mut self, criteria: &[Criterion]) {
        for (index, criterion) in criteria.iter().enumerate() {
            self.criterion(index, criterion);
            self.buf.append(" and ");
        }
        self.buf.cut_back(5);
    }

    fn criterion(&mut self, index: usize, criterion: &Criterion) {
        match criterion {
            Criterion::Eq(left, right) => self.comparison(left, "=", right),
            Criterion::NotEq(left, right) => self.comparison(left, "<>", right),
            Criterion::Less(left, right) => self.comparison(left, "<", right),
            Criterion::LessEq(left, right) => self.comparison(left, "<=", right),
            Criterion::Greater(left, right) => self.comparison(left, ">", right),
            Criterion::GreaterEq(left, right) => self.comparison(left, ">=", right),
            Criterion::IsNull(operand) => {
                self.operand(operand);
                self.buf.append(" is null");
            }
            Criterion::IsNotNull(operand) => {
                self.operand(operand);
                self.buf.append(" is not null");
            }
            Criterion::Like(left, right) => self.comparison(left, "like", right),
            Criterion::NotLike(left, right) => self.comparison(left, "not like", right),
            Criterion::Between(operand, (lower, upper)) => {
                self.operand(operand);
                self.buf.append(" between ");
                self.operand(lower);
                self.buf.append(" and ");
                self.operand(upper);
            }
            Criterion::NotBetween(operand, (lower, upper)) => {
                self.operand(operand);
                self.buf.append(" not between ");
                self.operand(lower);
                self.buf.append(" and ");
                self.operand(upper);
            }
            Criterion::InList(operand, list) => {
                self.operand(operand);
                self.buf.append(" in (");
                self.operand_list(list);
                self.buf.append(")");
            }
            Criterion::NotInList(operand, list) => {
                self.operand(operand);
                self.buf.append(" not in (");
                self.operand_list(list);
                self.buf.append(")");
            }
            Criterion::InList2(pair, list) => {
                self.operand_pair(pair);
                self.buf.append(" in (");
                self.operand_pair_list(list);
                self.buf.append(")");
            }
            Criterion::NotInList2(pair, list) => {
                self.operand_pair(pair);
                self.buf.append(" not in (");
                self.operand_pair_list(list);
                self.buf.append(")");
            }
            Criterion::InSubquery(operand, context) => {
                self.operand(operand);
                self.buf.append(" in (");
                let statement = self.subquery(context);
                self.buf.append_statement(&statement);
                self.buf.append(")");
            }
            Criterion::NotInSubquery(operand, context) => {
                self.operand(operand);
                self.buf.append(" not in (");
                let statement = self.subquery(context);
                self.buf.append_statement(&statement);
                self.buf.append(")");
            }
            Criterion::InSubquery2(pair, context) => {
                self.operand_pair(pair);
                self.buf.append(" in (");
                let statement = self.subquery(context);
                self.buf.append_statement(&statement);
                self.buf.append(")");
            }
            Criterion::NotInSubquery2(pair, context) => {
                self.operand_pair(pair);
                self.buf.append(" not in (");
                let statement = self.subquery(context);
                self.buf.append_statement(&statement);
                self.buf.append(")");
            }
            Criterion::Exists(context) => {
                self.buf.append("exists (");
                let statement = self.subquery(context);
                self.buf.append_statement(&statement);
                self.buf.append(")");
            }
            Criterion::NotExists(context) => {
                self.buf.append("not exists (");
                let statement = self.subquery(context);
                self.buf.append_statement(&statement);
                self.buf.append(")");
            }
            Criterion::And(criteria) => self.group(criteria),
            Criterion::Or(criteria) => {
                if index > 0 {
                    self.buf.cut_back(5);
                    self.buf.append(" or ");
                }
                self.group(criteria);
            }
            Criterion::Not(criteria) => {
                self.buf.append("not ");
                self.group(criteria);
            }
        }
    }

    fn comparison(&mut self, left: &Operand, op: &str, right: &Operand) {
        self.operand(left);
        self.buf.append(format!(" {op} "));
        self.operand(right);
    }

    fn group(&mut self, criteria: &[Criterion]) {
        self.buf.append("(");
        self.criteria(criteria);
        self.buf.append(")");
    }

    /// An empty list renders as `null` so the membership test stays
    /// well-formed and matches no rows.
    fn operand_list(&mut self, list: &[Operand]) {
        if list.is_empty() {
            self.buf.append("null");
            return;
        }
        for operand in list {
            self.operand(operand);
            self.buf.append(", ");
        }
        self.buf.cut_back(2);
    }

    fn operand_pair(&mut self, pair: &(Operand, Operand)) {
        self.buf.append("(");
        self.operand(&pair.0);
        self.buf.append(", ");
        self.operand(&pair.1);
        self.buf.append(")");
    }

    fn operand_pair_list(&mut self, list: &[(Operand, Operand)]) {
        if list.is_empty() {
            self.buf.append("null");
            return;
        }
        for pair in list {
            self.operand_pair(pair);
            self.buf.append(", ");
        }
        self.buf.cut_back(2);
    }
}
