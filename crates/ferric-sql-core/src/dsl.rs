//! Entry points of the query DSL.
//!
//! Statements start from one of the free functions here and grow
//! through the context methods; see the crate root for a walkthrough.

use crate::context::{
    DeleteContext, InsertContext, SchemaContext, ScriptContext, SelectContext, TemplateContext,
    UpdateContext,
};
use crate::expr::{Aggregate, ColumnExpr, SortItem, SortOrder};
use crate::metamodel::{Column, EntityMetamodel};

/// Starts a select query over an entity.
#[must_use]
pub fn from(metamodel: &EntityMetamodel) -> SelectContext {
    SelectContext::new(metamodel)
}

/// Starts an insert statement into an entity.
#[must_use]
pub fn insert(metamodel: &EntityMetamodel) -> InsertContext {
    InsertContext::new(metamodel)
}

/// Starts an update statement over an entity.
#[must_use]
pub fn update(metamodel: &EntityMetamodel) -> UpdateContext {
    UpdateContext::new(metamodel)
}

/// Starts a delete statement over an entity.
#[must_use]
pub fn delete(metamodel: &EntityMetamodel) -> DeleteContext {
    DeleteContext::new(metamodel)
}

/// Describes create DDL for the listed entities.
#[must_use]
pub fn create(metamodels: &[&EntityMetamodel], with_foreign_keys: bool) -> SchemaContext {
    SchemaContext::new(metamodels, with_foreign_keys)
}

/// Describes drop DDL for the listed entities.
#[must_use]
pub fn drop(metamodels: &[&EntityMetamodel]) -> SchemaContext {
    SchemaContext::new(metamodels, false)
}

/// Starts a template statement from raw SQL with `/*name*/literal`
/// bind markers.
#[must_use]
pub fn template(sql: impl Into<String>) -> TemplateContext {
    TemplateContext::new(sql)
}

/// Wraps a raw SQL script.
#[must_use]
pub fn script(sql: impl Into<String>) -> ScriptContext {
    ScriptContext::new(sql)
}

/// `count(column)`, typed as a 64-bit integer.
#[must_use]
pub fn count<V>(column: &Column<V>) -> Aggregate<i64> {
    Aggregate::new(ColumnExpr::Count(column.as_ref().clone()))
}

/// `count(*)`, typed as a 64-bit integer.
#[must_use]
pub fn count_star() -> Aggregate<i64> {
    Aggregate::new(ColumnExpr::CountStar)
}

/// `sum(column)`, keeping the column's value type.
#[must_use]
pub fn sum<V>(column: &Column<V>) -> Aggregate<V> {
    Aggregate::new(ColumnExpr::Sum(column.as_ref().clone()))
}

/// `avg(column)`, typed as a float.
#[must_use]
pub fn avg<V>(column: &Column<V>) -> Aggregate<f64> {
    Aggregate::new(ColumnExpr::Avg(column.as_ref().clone()))
}

/// `max(column)`, keeping the column's value type.
#[must_use]
pub fn max<V>(column: &Column<V>) -> Aggregate<V> {
    Aggregate::new(ColumnExpr::Max(column.as_ref().clone()))
}

/// `min(column)`, keeping the column's value type.
#[must_use]
pub fn min<V>(column: &Column<V>) -> Aggregate<V> {
    Aggregate::new(ColumnExpr::Min(column.as_ref().clone()))
}

/// An ascending order-by item.
#[must_use]
pub fn asc<V>(column: &Column<V>) -> SortItem {
    SortItem {
        column: column.as_ref().clone(),
        order: SortOrder::Asc,
    }
}

/// A descending order-by item.
#[must_use]
pub fn desc<V>(column: &Column<V>) -> SortItem {
    SortItem {
        column: column.as_ref().clone(),
        order: SortOrder::Desc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ColumnExpression;
    use crate::metamodel::integer;

    #[test]
    fn test_entry_points_capture_the_target() {
        let mut builder = EntityMetamodel::builder("Customer");
        let _id = builder.column(integer("id").id());
        let customer = builder.build();
        assert_eq!(from(&customer).target(), &customer);
        assert_eq!(insert(&customer).target(), &customer);
        assert_eq!(update(&customer).target(), &customer);
        assert_eq!(delete(&customer).target(), &customer);
    }

    #[test]
    fn test_aggregates_erase_to_expressions() {
        let mut builder = EntityMetamodel::builder("Customer");
        let id = builder.column(integer("id").id());
        let _customer = builder.build();
        assert!(count(&id).to_expr().is_aggregate());
        assert!(count_star().to_expr().is_aggregate());
        assert!(max(&id).to_expr().is_aggregate());
        assert!(!id.to_expr().is_aggregate());
    }
}
