//! Set-operation context combining select queries.

use crate::context::SelectContext;
use crate::expr::SortOrder;

/// The combining operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperationKind {
    /// `union`
    Union,
    /// `union all`
    UnionAll,
    /// `intersect`
    Intersect,
    /// `except`
    Except,
}

impl SetOperationKind {
    /// Returns the SQL form of the operator.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::UnionAll => "union all",
            Self::Intersect => "intersect",
            Self::Except => "except",
        }
    }
}

/// One node of the set-operation tree.
#[derive(Debug, Clone)]
pub enum SetOperationComponent {
    /// A single select query.
    Leaf(Box<SelectContext>),
    /// Two combined components.
    Composite {
        /// The combining operator.
        kind: SetOperationKind,
        /// Left side.
        left: Box<SetOperationComponent>,
        /// Right side.
        right: Box<SetOperationComponent>,
    },
}

/// Accumulated description of a set operation.
///
/// Ordering is positional: items name 1-based select-list positions.
#[derive(Debug, Clone)]
pub struct SetOperationContext {
    component: SetOperationComponent,
    order_by: Vec<(usize, SortOrder)>,
}

impl SetOperationContext {
    pub(crate) fn from_selects(
        kind: SetOperationKind,
        left: &SelectContext,
        right: &SelectContext,
    ) -> Self {
        Self {
            component: SetOperationComponent::Composite {
                kind,
                left: Box::new(SetOperationComponent::Leaf(Box::new(left.clone()))),
                right: Box::new(SetOperationComponent::Leaf(Box::new(right.clone()))),
            },
            order_by: Vec::new(),
        }
    }

    /// The component tree.
    #[must_use]
    pub fn component(&self) -> &SetOperationComponent {
        &self.component
    }

    /// Positional order-by items.
    #[must_use]
    pub fn order_by_items(&self) -> &[(usize, SortOrder)] {
        &self.order_by
    }

    /// Appends positional order-by items (1-based positions).
    #[must_use]
    pub fn order_by(&self, items: &[(usize, SortOrder)]) -> Self {
        let mut context = self.clone();
        context.order_by.extend_from_slice(items);
        context
    }

    /// Combines with a further select through `union`.
    #[must_use]
    pub fn union(&self, other: &SelectContext) -> Self {
        self.combine(SetOperationKind::Union, other)
    }

    /// Combines with a further select through `union all`.
    #[must_use]
    pub fn union_all(&self, other: &SelectContext) -> Self {
        self.combine(SetOperationKind::UnionAll, other)
    }

    /// Combines with a further select through `intersect`.
    #[must_use]
    pub fn intersect(&self, other: &SelectContext) -> Self {
        self.combine(SetOperationKind::Intersect, other)
    }

    /// Combines with a further select through `except`.
    #[must_use]
    pub fn except(&self, other: &SelectContext) -> Self {
        self.combine(SetOperationKind::Except, other)
    }

    fn combine(&self, kind: SetOperationKind, other: &SelectContext) -> Self {
        Self {
            component: SetOperationComponent::Composite {
                kind,
                left: Box::new(self.component.clone()),
                right: Box::new(SetOperationComponent::Leaf(Box::new(other.clone()))),
            },
            order_by: self.order_by.clone(),
        }
    }
}
