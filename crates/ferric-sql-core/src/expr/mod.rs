//! Criteria trees and projection expressions.
//!
//! Filter scopes collect [`Criterion`] values whose leaves are
//! [`Operand`]s; builders later walk the tree to render SQL. Criteria
//! keep their insertion order, and composite nodes hold non-empty child
//! lists.

mod like;
mod scope;

pub use like::{Like, DEFAULT_ESCAPE_CHAR};
pub use scope::{AssignmentScope, FilterScope, IntoOptionValue};

use std::marker::PhantomData;

use crate::context::SelectContext;
use crate::metamodel::{Column, ColumnRef};
use crate::statement::BoundValue;
use crate::value::SqlValue;

/// A leaf of the criteria tree.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A column expression.
    Column(ColumnExpr),
    /// A bind argument.
    Argument(BoundValue),
    /// An escaped LIKE pattern bound through the originating column.
    Escape(ColumnRef, Like),
    /// A scalar subquery.
    Subquery(Box<SelectContext>),
}

impl Operand {
    pub(crate) fn column<V>(column: &Column<V>) -> Self {
        Self::Column(ColumnExpr::Column(column.as_ref().clone()))
    }

    pub(crate) fn expression(expr: &dyn ColumnExpression) -> Self {
        Self::Column(expr.to_expr())
    }

    pub(crate) fn argument<V>(column: &Column<V>, value: SqlValue) -> Self {
        Self::Argument(BoundValue {
            value,
            masking: column.as_ref().property().masking,
        })
    }

    pub(crate) fn argument_for(expr: &dyn ColumnExpression, value: SqlValue) -> Self {
        Self::Argument(BoundValue {
            value,
            masking: expr.masking(),
        })
    }
}

/// One predicate or composite in a filter tree.
#[derive(Debug, Clone)]
pub enum Criterion {
    /// `left = right`
    Eq(Operand, Operand),
    /// `left <> right`
    NotEq(Operand, Operand),
    /// `left < right`
    Less(Operand, Operand),
    /// `left <= right`
    LessEq(Operand, Operand),
    /// `left > right`
    Greater(Operand, Operand),
    /// `left >= right`
    GreaterEq(Operand, Operand),
    /// `operand is null`
    IsNull(Operand),
    /// `operand is not null`
    IsNotNull(Operand),
    /// `left like right`
    Like(Operand, Operand),
    /// `left not like right`
    NotLike(Operand, Operand),
    /// `operand between lo and hi`
    Between(Operand, (Operand, Operand)),
    /// `operand not between lo and hi`
    NotBetween(Operand, (Operand, Operand)),
    /// `operand in (…)`
    InList(Operand, Vec<Operand>),
    /// `operand not in (…)`
    NotInList(Operand, Vec<Operand>),
    /// `(a, b) in ((…, …), …)`
    InList2((Operand, Operand), Vec<(Operand, Operand)>),
    /// `(a, b) not in ((…, …), …)`
    NotInList2((Operand, Operand), Vec<(Operand, Operand)>),
    /// `operand in (select …)`
    InSubquery(Operand, Box<SelectContext>),
    /// `operand not in (select …)`
    NotInSubquery(Operand, Box<SelectContext>),
    /// `(a, b) in (select …)`
    InSubquery2((Operand, Operand), Box<SelectContext>),
    /// `(a, b) not in (select …)`
    NotInSubquery2((Operand, Operand), Box<SelectContext>),
    /// `exists (select …)`
    Exists(Box<SelectContext>),
    /// `not exists (select …)`
    NotExists(Box<SelectContext>),
    /// Parenthesized conjunction of the children.
    And(Vec<Criterion>),
    /// Parenthesized group joined to the preceding criterion with `or`.
    Or(Vec<Criterion>),
    /// Negated parenthesized group.
    Not(Vec<Criterion>),
}

/// One projection item: a plain column or an aggregate over one.
#[derive(Debug, Clone)]
pub enum ColumnExpr {
    /// A plain column.
    Column(ColumnRef),
    /// `count(column)`
    Count(ColumnRef),
    /// `count(*)`
    CountStar,
    /// `sum(column)`
    Sum(ColumnRef),
    /// `avg(column)`
    Avg(ColumnRef),
    /// `max(column)`
    Max(ColumnRef),
    /// `min(column)`
    Min(ColumnRef),
}

impl ColumnExpr {
    /// Whether the expression aggregates rows.
    #[must_use]
    pub const fn is_aggregate(&self) -> bool {
        !matches!(self, Self::Column(_))
    }
}

/// An expression that can appear in a projection.
///
/// Implemented by [`Column`] and by the aggregate handles returned from
/// the [`dsl`](crate::dsl) functions, so both mix freely in
/// `select(&[…])`.
pub trait ColumnExpression {
    /// The erased expression.
    fn to_expr(&self) -> ColumnExpr;

    /// Whether bind arguments compared against this expression are
    /// masked in debug SQL.
    fn masking(&self) -> bool {
        false
    }
}

/// Marker tying a [`ColumnExpression`] to the Rust type of its values.
///
/// Comparison methods on [`FilterScope`] are generic over this trait,
/// which is how `eq` accepts a plain column and `having` comparisons
/// accept an aggregate, while the value side stays type checked.
pub trait TypedExpression<V>: ColumnExpression {}

impl<V> ColumnExpression for Column<V> {
    fn to_expr(&self) -> ColumnExpr {
        ColumnExpr::Column(self.as_ref().clone())
    }

    fn masking(&self) -> bool {
        self.as_ref().property().masking
    }
}

impl<V> TypedExpression<V> for Column<V> {}

impl<T: ColumnExpression + ?Sized> ColumnExpression for &T {
    fn to_expr(&self) -> ColumnExpr {
        (**self).to_expr()
    }

    fn masking(&self) -> bool {
        (**self).masking()
    }
}

impl<V, T: TypedExpression<V>> TypedExpression<V> for &T {}

/// A typed aggregate over a column.
///
/// Created by the [`dsl`](crate::dsl) functions `count`, `count_star`,
/// `sum`, `avg`, `max`, and `min`.
pub struct Aggregate<V> {
    expr: ColumnExpr,
    _marker: PhantomData<fn() -> V>,
}

impl<V> Aggregate<V> {
    pub(crate) fn new(expr: ColumnExpr) -> Self {
        Self {
            expr,
            _marker: PhantomData,
        }
    }
}

impl<V> Clone for Aggregate<V> {
    fn clone(&self) -> Self {
        Self::new(self.expr.clone())
    }
}

impl<V> std::fmt::Debug for Aggregate<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregate").field("expr", &self.expr).finish()
    }
}

impl<V> ColumnExpression for Aggregate<V> {
    fn to_expr(&self) -> ColumnExpr {
        self.expr.clone()
    }
}

impl<V> TypedExpression<V> for Aggregate<V> {}

/// Sort direction of an order-by item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// One order-by item.
#[derive(Debug, Clone)]
pub struct SortItem {
    /// The sorted column.
    pub column: ColumnRef,
    /// Sort direction.
    pub order: SortOrder,
}
