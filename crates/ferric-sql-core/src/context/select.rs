//! Select query context.

use crate::context::{SetOperationContext, SetOperationKind};
use crate::expr::{ColumnExpr, ColumnExpression, Criterion, FilterScope, SortItem};
use crate::metamodel::{ColumnRef, EntityMetamodel, MetamodelId};

const NOT_FOUND_HINT: &str =
    "Bind it to this query in advance using the from or join clause.";

/// How a joined table relates to the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// `inner join`
    Inner,
    /// `left outer join`
    LeftOuter,
}

/// One joined entity and its `on` criteria.
#[derive(Debug, Clone)]
pub struct Join {
    /// Join kind.
    pub kind: JoinKind,
    /// Joined entity.
    pub target: EntityMetamodel,
    /// Criteria of the `on` clause.
    pub criteria: Vec<Criterion>,
}

/// What the query projects.
#[derive(Debug, Clone)]
pub enum Projection {
    /// All columns of the listed entities.
    Entities(Vec<EntityMetamodel>),
    /// The listed expressions.
    Expressions(Vec<ColumnExpr>),
}

/// Accumulated description of a select query.
///
/// Produced by [`dsl::from`](crate::dsl::from); every method returns a
/// new context.
#[derive(Debug, Clone)]
pub struct SelectContext {
    target: EntityMetamodel,
    joins: Vec<Join>,
    where_criteria: Vec<Criterion>,
    projection: Projection,
    distinct: bool,
    group_by: Vec<ColumnRef>,
    having: Vec<Criterion>,
    order_by: Vec<SortItem>,
    offset: Option<u64>,
    limit: Option<u64>,
    for_update: bool,
}

impl SelectContext {
    pub(crate) fn new(target: &EntityMetamodel) -> Self {
        Self {
            projection: Projection::Entities(vec![target.clone()]),
            target: target.clone(),
            joins: Vec::new(),
            where_criteria: Vec::new(),
            distinct: false,
            group_by: Vec::new(),
            having: Vec::new(),
            order_by: Vec::new(),
            offset: None,
            limit: None,
            for_update: false,
        }
    }

    /// The queried entity.
    #[must_use]
    pub fn target(&self) -> &EntityMetamodel {
        &self.target
    }

    /// Joined entities in declaration order.
    #[must_use]
    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    /// Criteria of the `where` clause.
    #[must_use]
    pub fn where_criteria(&self) -> &[Criterion] {
        &self.where_criteria
    }

    /// The projection.
    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Whether duplicate rows are eliminated.
    #[must_use]
    pub const fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Explicit `group by` columns.
    #[must_use]
    pub fn group_by_columns(&self) -> &[ColumnRef] {
        &self.group_by
    }

    /// Criteria of the `having` clause.
    #[must_use]
    pub fn having_criteria(&self) -> &[Criterion] {
        &self.having
    }

    /// Order-by items.
    #[must_use]
    pub fn order_by_items(&self) -> &[SortItem] {
        &self.order_by
    }

    /// Row offset, when set.
    #[must_use]
    pub const fn offset_rows(&self) -> Option<u64> {
        self.offset
    }

    /// Row limit, when set.
    #[must_use]
    pub const fn limit_rows(&self) -> Option<u64> {
        self.limit
    }

    /// Whether the query locks selected rows.
    #[must_use]
    pub const fn is_for_update(&self) -> bool {
        self.for_update
    }

    /// Adds an inner join.
    #[must_use]
    pub fn inner_join<F>(&self, target: &EntityMetamodel, on: F) -> Self
    where
        F: FnOnce(&mut FilterScope),
    {
        self.join(JoinKind::Inner, target, on)
    }

    /// Adds a left outer join.
    #[must_use]
    pub fn left_join<F>(&self, target: &EntityMetamodel, on: F) -> Self
    where
        F: FnOnce(&mut FilterScope),
    {
        self.join(JoinKind::LeftOuter, target, on)
    }

    fn join<F>(&self, kind: JoinKind, target: &EntityMetamodel, on: F) -> Self
    where
        F: FnOnce(&mut FilterScope),
    {
        let mut scope = FilterScope::new();
        on(&mut scope);
        let mut context = self.clone();
        context.joins.push(Join {
            kind,
            target: target.clone(),
            criteria: scope.into_criteria(),
        });
        context
    }

    /// Appends criteria to the `where` clause.
    #[must_use]
    pub fn where_by<F>(&self, f: F) -> Self
    where
        F: FnOnce(&mut FilterScope),
    {
        let mut scope = FilterScope::new();
        f(&mut scope);
        let mut context = self.clone();
        context.where_criteria.extend(scope.into_criteria());
        context
    }

    /// Projects the given expressions.
    ///
    /// # Panics
    ///
    /// Panics when an expression's column belongs to an entity that is
    /// neither the target nor joined.
    #[must_use]
    pub fn select(&self, expressions: &[&dyn ColumnExpression]) -> Self {
        let expressions: Vec<ColumnExpr> = expressions.iter().map(|e| e.to_expr()).collect();
        for (index, expression) in expressions.iter().enumerate() {
            if let Some(column) = expression_column(expression) {
                self.ensure_bound_at(column.owner_id(), "expressions", index);
            }
        }
        let mut context = self.clone();
        context.projection = Projection::Expressions(expressions);
        context
    }

    /// Projects all columns of one entity.
    ///
    /// # Panics
    ///
    /// Panics when the entity is neither the target nor joined.
    #[must_use]
    pub fn select_entity(&self, metamodel: &EntityMetamodel) -> Self {
        assert!(
            self.is_bound(metamodel.id()),
            "The 'metamodel' metamodel is not found. {NOT_FOUND_HINT}"
        );
        let mut context = self.clone();
        context.projection = Projection::Entities(vec![metamodel.clone()]);
        context
    }

    /// Projects all columns of the listed entities.
    ///
    /// # Panics
    ///
    /// Panics when any listed entity is neither the target nor joined.
    #[must_use]
    pub fn select_entities(&self, metamodels: &[&EntityMetamodel]) -> Self {
        for (index, metamodel) in metamodels.iter().enumerate() {
            self.ensure_bound_at(metamodel.id(), "metamodels", index);
        }
        let mut context = self.clone();
        context.projection =
            Projection::Entities(metamodels.iter().map(|m| (*m).clone()).collect());
        context
    }

    /// Eliminates duplicate rows.
    #[must_use]
    pub fn distinct(&self) -> Self {
        let mut context = self.clone();
        context.distinct = true;
        context
    }

    /// Replaces the `group by` columns.
    #[must_use]
    pub fn group_by(&self, columns: &[&dyn AsRef<ColumnRef>]) -> Self {
        let mut context = self.clone();
        context.group_by = columns.iter().map(|c| (*c).as_ref().clone()).collect();
        context
    }

    /// Appends criteria to the `having` clause.
    #[must_use]
    pub fn having<F>(&self, f: F) -> Self
    where
        F: FnOnce(&mut FilterScope),
    {
        let mut scope = FilterScope::new();
        f(&mut scope);
        let mut context = self.clone();
        context.having.extend(scope.into_criteria());
        context
    }

    /// Appends order-by items.
    ///
    /// # Panics
    ///
    /// Panics when an item's column belongs to an entity that is
    /// neither the target nor joined.
    #[must_use]
    pub fn order_by(&self, items: &[SortItem]) -> Self {
        for (index, item) in items.iter().enumerate() {
            self.ensure_bound_at(item.column.owner_id(), "expressions", index);
        }
        let mut context = self.clone();
        context.order_by.extend(items.iter().cloned());
        context
    }

    /// Skips the first `n` rows.
    #[must_use]
    pub fn offset(&self, n: u64) -> Self {
        let mut context = self.clone();
        context.offset = Some(n);
        context
    }

    /// Returns at most `n` rows.
    #[must_use]
    pub fn limit(&self, n: u64) -> Self {
        let mut context = self.clone();
        context.limit = Some(n);
        context
    }

    /// Locks the selected rows.
    #[must_use]
    pub fn for_update(&self) -> Self {
        let mut context = self.clone();
        context.for_update = true;
        context
    }

    /// Combines with another select through `union`.
    #[must_use]
    pub fn union(&self, other: &Self) -> SetOperationContext {
        SetOperationContext::from_selects(SetOperationKind::Union, self, other)
    }

    /// Combines with another select through `union all`.
    #[must_use]
    pub fn union_all(&self, other: &Self) -> SetOperationContext {
        SetOperationContext::from_selects(SetOperationKind::UnionAll, self, other)
    }

    /// Combines with another select through `intersect`.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> SetOperationContext {
        SetOperationContext::from_selects(SetOperationKind::Intersect, self, other)
    }

    /// Combines with another select through `except`.
    #[must_use]
    pub fn except(&self, other: &Self) -> SetOperationContext {
        SetOperationContext::from_selects(SetOperationKind::Except, self, other)
    }

    fn is_bound(&self, id: MetamodelId) -> bool {
        self.target.id() == id || self.joins.iter().any(|j| j.target.id() == id)
    }

    fn ensure_bound_at(&self, id: MetamodelId, param: &str, index: usize) {
        assert!(
            self.is_bound(id),
            "The '{param}' metamodel(index={index}) is not found. {NOT_FOUND_HINT}"
        );
    }
}

fn expression_column(expression: &ColumnExpr) -> Option<&ColumnRef> {
    match expression {
        ColumnExpr::Column(c)
        | ColumnExpr::Count(c)
        | ColumnExpr::Sum(c)
        | ColumnExpr::Avg(c)
        | ColumnExpr::Max(c)
        | ColumnExpr::Min(c) => Some(c),
        ColumnExpr::CountStar => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::{asc, from};
    use crate::metamodel::{integer, varchar, EntityMetamodel};

    struct Customer {
        metamodel: EntityMetamodel,
        id: crate::metamodel::Column<i32>,
        name: crate::metamodel::Column<String>,
    }

    fn customer() -> Customer {
        let mut builder = EntityMetamodel::builder("Customer");
        let id = builder.column(integer("id").id());
        let name = builder.column(varchar("name", 50));
        Customer {
            metamodel: builder.build(),
            id,
            name,
        }
    }

    #[test]
    fn test_mutators_leave_the_receiver_untouched() {
        let c = customer();
        let base = from(&c.metamodel);
        let filtered = base.where_by(|w| w.eq(&c.id, 1));
        assert!(base.where_criteria().is_empty());
        assert_eq!(filtered.where_criteria().len(), 1);
    }

    #[test]
    fn test_branches_do_not_observe_each_other() {
        let c = customer();
        let base = from(&c.metamodel).where_by(|w| w.eq(&c.id, 1));
        let by_name = base.where_by(|w| w.eq(&c.name, "a"));
        let by_limit = base.limit(10);
        assert_eq!(by_name.where_criteria().len(), 2);
        assert_eq!(by_limit.where_criteria().len(), 1);
        assert_eq!(by_name.limit_rows(), None);
        assert_eq!(by_limit.limit_rows(), Some(10));
    }

    #[test]
    #[should_panic(expected = "The 'metamodel' metamodel is not found.")]
    fn test_select_entity_rejects_unbound_metamodel() {
        let c = customer();
        let other = customer();
        let _context = from(&c.metamodel).select_entity(&other.metamodel);
    }

    #[test]
    #[should_panic(expected = "The 'metamodels' metamodel(index=1) is not found.")]
    fn test_select_entities_reports_the_offending_index() {
        let c = customer();
        let other = customer();
        let _context =
            from(&c.metamodel).select_entities(&[&c.metamodel, &other.metamodel]);
    }

    #[test]
    #[should_panic(expected = "The 'expressions' metamodel(index=0) is not found.")]
    fn test_order_by_rejects_unbound_column() {
        let c = customer();
        let other = customer();
        let _context = from(&c.metamodel).order_by(&[asc(&other.id)]);
    }
}
