//! Scopes that collect criteria and assignments from DSL closures.

use std::ops::RangeInclusive;

use crate::context::SelectContext;
use crate::expr::{Criterion, Like, Operand, TypedExpression};
use crate::metamodel::{Column, ColumnRef};
use crate::value::ToSqlValue;

/// Conversion into an optional bind value.
///
/// Lets scope methods accept bare values, `Option`s, and string
/// literals for text columns with one signature.
pub trait IntoOptionValue<V> {
    /// Converts into an optional value.
    fn into_option_value(self) -> Option<V>;
}

impl<V> IntoOptionValue<V> for V {
    fn into_option_value(self) -> Option<V> {
        Some(self)
    }
}

impl<V> IntoOptionValue<V> for Option<V> {
    fn into_option_value(self) -> Option<V> {
        self
    }
}

impl IntoOptionValue<String> for &str {
    fn into_option_value(self) -> Option<String> {
        Some(String::from(self))
    }
}

impl IntoOptionValue<String> for Option<&str> {
    fn into_option_value(self) -> Option<String> {
        self.map(String::from)
    }
}

/// Collects criteria inside `where`, `having`, and join `on` closures.
///
/// The comparison and LIKE methods skip the criterion entirely when
/// the value resolves to `None`, so optional filters compose without
/// conditionals at the call site.
#[derive(Debug, Default)]
pub struct FilterScope {
    criteria: Vec<Criterion>,
}

impl FilterScope {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The collected criteria, in insertion order.
    #[must_use]
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub(crate) fn into_criteria(self) -> Vec<Criterion> {
        self.criteria
    }

    fn run<F>(f: F) -> Vec<Criterion>
    where
        F: FnOnce(&mut Self),
    {
        let mut scope = Self::new();
        f(&mut scope);
        scope.into_criteria()
    }

    /// Applies the `=` operator.
    pub fn eq<V: ToSqlValue>(
        &mut self,
        left: impl TypedExpression<V>,
        value: impl IntoOptionValue<V>,
    ) {
        if let Some(value) = value.into_option_value() {
            self.criteria.push(Criterion::Eq(
                Operand::expression(&left),
                Operand::argument_for(&left, value.to_sql_value()),
            ));
        }
    }

    /// Applies the `<>` operator.
    pub fn not_eq<V: ToSqlValue>(
        &mut self,
        left: impl TypedExpression<V>,
        value: impl IntoOptionValue<V>,
    ) {
        if let Some(value) = value.into_option_value() {
            self.criteria.push(Criterion::NotEq(
                Operand::expression(&left),
                Operand::argument_for(&left, value.to_sql_value()),
            ));
        }
    }

    /// Applies the `<` operator.
    pub fn less<V: ToSqlValue>(
        &mut self,
        left: impl TypedExpression<V>,
        value: impl IntoOptionValue<V>,
    ) {
        if let Some(value) = value.into_option_value() {
            self.criteria.push(Criterion::Less(
                Operand::expression(&left),
                Operand::argument_for(&left, value.to_sql_value()),
            ));
        }
    }

    /// Applies the `<=` operator.
    pub fn less_eq<V: ToSqlValue>(
        &mut self,
        left: impl TypedExpression<V>,
        value: impl IntoOptionValue<V>,
    ) {
        if let Some(value) = value.into_option_value() {
            self.criteria.push(Criterion::LessEq(
                Operand::expression(&left),
                Operand::argument_for(&left, value.to_sql_value()),
            ));
        }
    }

    /// Applies the `>` operator.
    pub fn greater<V: ToSqlValue>(
        &mut self,
        left: impl TypedExpression<V>,
        value: impl IntoOptionValue<V>,
    ) {
        if let Some(value) = value.into_option_value() {
            self.criteria.push(Criterion::Greater(
                Operand::expression(&left),
                Operand::argument_for(&left, value.to_sql_value()),
            ));
        }
    }

    /// Applies the `>=` operator.
    pub fn greater_eq<V: ToSqlValue>(
        &mut self,
        left: impl TypedExpression<V>,
        value: impl IntoOptionValue<V>,
    ) {
        if let Some(value) = value.into_option_value() {
            self.criteria.push(Criterion::GreaterEq(
                Operand::expression(&left),
                Operand::argument_for(&left, value.to_sql_value()),
            ));
        }
    }

    /// Applies the `=` operator between two columns.
    pub fn eq_column<V>(&mut self, left: &Column<V>, right: &Column<V>) {
        self.criteria.push(Criterion::Eq(
            Operand::column(left),
            Operand::column(right),
        ));
    }

    /// Applies the `<>` operator between two columns.
    pub fn not_eq_column<V>(&mut self, left: &Column<V>, right: &Column<V>) {
        self.criteria.push(Criterion::NotEq(
            Operand::column(left),
            Operand::column(right),
        ));
    }

    /// Applies the `<` operator between two columns.
    pub fn less_column<V>(&mut self, left: &Column<V>, right: &Column<V>) {
        self.criteria.push(Criterion::Less(
            Operand::column(left),
            Operand::column(right),
        ));
    }

    /// Applies the `<=` operator between two columns.
    pub fn less_eq_column<V>(&mut self, left: &Column<V>, right: &Column<V>) {
        self.criteria.push(Criterion::LessEq(
            Operand::column(left),
            Operand::column(right),
        ));
    }

    /// Applies the `>` operator between two columns.
    pub fn greater_column<V>(&mut self, left: &Column<V>, right: &Column<V>) {
        self.criteria.push(Criterion::Greater(
            Operand::column(left),
            Operand::column(right),
        ));
    }

    /// Applies the `>=` operator between two columns.
    pub fn greater_eq_column<V>(&mut self, left: &Column<V>, right: &Column<V>) {
        self.criteria.push(Criterion::GreaterEq(
            Operand::column(left),
            Operand::column(right),
        ));
    }

    /// Applies the `=` operator against a scalar subquery.
    pub fn eq_subquery<V>(&mut self, column: &Column<V>, subquery: SelectContext) {
        self.criteria.push(Criterion::Eq(
            Operand::column(column),
            Operand::Subquery(Box::new(subquery)),
        ));
    }

    /// Applies the `<>` operator against a scalar subquery.
    pub fn not_eq_subquery<V>(&mut self, column: &Column<V>, subquery: SelectContext) {
        self.criteria.push(Criterion::NotEq(
            Operand::column(column),
            Operand::Subquery(Box::new(subquery)),
        ));
    }

    /// Applies the `is null` predicate.
    pub fn is_null<V>(&mut self, column: &Column<V>) {
        self.criteria.push(Criterion::IsNull(Operand::column(column)));
    }

    /// Applies the `is not null` predicate.
    pub fn is_not_null<V>(&mut self, column: &Column<V>) {
        self.criteria
            .push(Criterion::IsNotNull(Operand::column(column)));
    }

    /// Applies the `like` operator with a verbatim pattern.
    pub fn like(&mut self, column: &Column<String>, pattern: impl IntoOptionValue<String>) {
        if let Some(pattern) = pattern.into_option_value() {
            self.criteria.push(Criterion::Like(
                Operand::column(column),
                Operand::argument(column, pattern.to_sql_value()),
            ));
        }
    }

    /// Applies the `not like` operator with a verbatim pattern.
    pub fn not_like(&mut self, column: &Column<String>, pattern: impl IntoOptionValue<String>) {
        if let Some(pattern) = pattern.into_option_value() {
            self.criteria.push(Criterion::NotLike(
                Operand::column(column),
                Operand::argument(column, pattern.to_sql_value()),
            ));
        }
    }

    /// Applies the `like` operator with a prepared pattern.
    pub fn like_escaped(&mut self, column: &Column<String>, pattern: Like) {
        self.criteria.push(Criterion::Like(
            Operand::column(column),
            Operand::Escape(column.as_ref().clone(), pattern),
        ));
    }

    /// Applies the `not like` operator with a prepared pattern.
    pub fn not_like_escaped(&mut self, column: &Column<String>, pattern: Like) {
        self.criteria.push(Criterion::NotLike(
            Operand::column(column),
            Operand::Escape(column.as_ref().clone(), pattern),
        ));
    }

    /// Matches values starting with `text`, escaping wildcards in it.
    pub fn starts_with(&mut self, column: &Column<String>, text: impl IntoOptionValue<String>) {
        if let Some(text) = text.into_option_value() {
            self.like_escaped(column, Like::prefix(&text));
        }
    }

    /// Negation of [`starts_with`](Self::starts_with).
    pub fn not_starts_with(&mut self, column: &Column<String>, text: impl IntoOptionValue<String>) {
        if let Some(text) = text.into_option_value() {
            self.not_like_escaped(column, Like::prefix(&text));
        }
    }

    /// Matches values containing `text`, escaping wildcards in it.
    pub fn contains(&mut self, column: &Column<String>, text: impl IntoOptionValue<String>) {
        if let Some(text) = text.into_option_value() {
            self.like_escaped(column, Like::infix(&text));
        }
    }

    /// Negation of [`contains`](Self::contains).
    pub fn not_contains(&mut self, column: &Column<String>, text: impl IntoOptionValue<String>) {
        if let Some(text) = text.into_option_value() {
            self.not_like_escaped(column, Like::infix(&text));
        }
    }

    /// Matches values ending with `text`, escaping wildcards in it.
    pub fn ends_with(&mut self, column: &Column<String>, text: impl IntoOptionValue<String>) {
        if let Some(text) = text.into_option_value() {
            self.like_escaped(column, Like::suffix(&text));
        }
    }

    /// Negation of [`ends_with`](Self::ends_with).
    pub fn not_ends_with(&mut self, column: &Column<String>, text: impl IntoOptionValue<String>) {
        if let Some(text) = text.into_option_value() {
            self.not_like_escaped(column, Like::suffix(&text));
        }
    }

    /// Applies the `between` operator over an inclusive range.
    pub fn between<V: ToSqlValue>(&mut self, column: &Column<V>, range: RangeInclusive<V>) {
        let (lo, hi) = range.into_inner();
        self.criteria.push(Criterion::Between(
            Operand::column(column),
            (
                Operand::argument(column, lo.to_sql_value()),
                Operand::argument(column, hi.to_sql_value()),
            ),
        ));
    }

    /// Applies the `not between` operator over an inclusive range.
    pub fn not_between<V: ToSqlValue>(&mut self, column: &Column<V>, range: RangeInclusive<V>) {
        let (lo, hi) = range.into_inner();
        self.criteria.push(Criterion::NotBetween(
            Operand::column(column),
            (
                Operand::argument(column, lo.to_sql_value()),
                Operand::argument(column, hi.to_sql_value()),
            ),
        ));
    }

    /// Applies the `in` operator over a value list.
    pub fn in_list<V: ToSqlValue>(
        &mut self,
        column: &Column<V>,
        values: impl IntoIterator<Item = V>,
    ) {
        let operands = values
            .into_iter()
            .map(|v| Operand::argument(column, v.to_sql_value()))
            .collect();
        self.criteria
            .push(Criterion::InList(Operand::column(column), operands));
    }

    /// Applies the `not in` operator over a value list.
    pub fn not_in_list<V: ToSqlValue>(
        &mut self,
        column: &Column<V>,
        values: impl IntoIterator<Item = V>,
    ) {
        let operands = values
            .into_iter()
            .map(|v| Operand::argument(column, v.to_sql_value()))
            .collect();
        self.criteria
            .push(Criterion::NotInList(Operand::column(column), operands));
    }

    /// Applies the `in` operator over a list of value pairs.
    pub fn in_pair_list<A: ToSqlValue, B: ToSqlValue>(
        &mut self,
        columns: (&Column<A>, &Column<B>),
        values: impl IntoIterator<Item = (A, B)>,
    ) {
        let operands = values
            .into_iter()
            .map(|(a, b)| {
                (
                    Operand::argument(columns.0, a.to_sql_value()),
                    Operand::argument(columns.1, b.to_sql_value()),
                )
            })
            .collect();
        self.criteria.push(Criterion::InList2(
            (Operand::column(columns.0), Operand::column(columns.1)),
            operands,
        ));
    }

    /// Applies the `not in` operator over a list of value pairs.
    pub fn not_in_pair_list<A: ToSqlValue, B: ToSqlValue>(
        &mut self,
        columns: (&Column<A>, &Column<B>),
        values: impl IntoIterator<Item = (A, B)>,
    ) {
        let operands = values
            .into_iter()
            .map(|(a, b)| {
                (
                    Operand::argument(columns.0, a.to_sql_value()),
                    Operand::argument(columns.1, b.to_sql_value()),
                )
            })
            .collect();
        self.criteria.push(Criterion::NotInList2(
            (Operand::column(columns.0), Operand::column(columns.1)),
            operands,
        ));
    }

    /// Applies the `in` operator against a subquery.
    pub fn in_subquery<V>(&mut self, column: &Column<V>, subquery: SelectContext) {
        self.criteria.push(Criterion::InSubquery(
            Operand::column(column),
            Box::new(subquery),
        ));
    }

    /// Applies the `not in` operator against a subquery.
    pub fn not_in_subquery<V>(&mut self, column: &Column<V>, subquery: SelectContext) {
        self.criteria.push(Criterion::NotInSubquery(
            Operand::column(column),
            Box::new(subquery),
        ));
    }

    /// Applies the `in` operator for a column pair against a subquery.
    pub fn in_pair_subquery<A, B>(
        &mut self,
        columns: (&Column<A>, &Column<B>),
        subquery: SelectContext,
    ) {
        self.criteria.push(Criterion::InSubquery2(
            (Operand::column(columns.0), Operand::column(columns.1)),
            Box::new(subquery),
        ));
    }

    /// Applies the `not in` operator for a column pair against a
    /// subquery.
    pub fn not_in_pair_subquery<A, B>(
        &mut self,
        columns: (&Column<A>, &Column<B>),
        subquery: SelectContext,
    ) {
        self.criteria.push(Criterion::NotInSubquery2(
            (Operand::column(columns.0), Operand::column(columns.1)),
            Box::new(subquery),
        ));
    }

    /// Applies the `exists` predicate.
    pub fn exists(&mut self, subquery: SelectContext) {
        self.criteria.push(Criterion::Exists(Box::new(subquery)));
    }

    /// Applies the `not exists` predicate.
    pub fn not_exists(&mut self, subquery: SelectContext) {
        self.criteria.push(Criterion::NotExists(Box::new(subquery)));
    }

    /// Groups the criteria collected by `f` into a parenthesized
    /// conjunction. An empty group adds nothing.
    pub fn and<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        let criteria = Self::run(f);
        if !criteria.is_empty() {
            self.criteria.push(Criterion::And(criteria));
        }
    }

    /// Groups the criteria collected by `f` and joins the group to the
    /// preceding criterion with `or`. An empty group adds nothing.
    pub fn or<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        let criteria = Self::run(f);
        if !criteria.is_empty() {
            self.criteria.push(Criterion::Or(criteria));
        }
    }

    /// Negates the parenthesized group collected by `f`. An empty
    /// group adds nothing.
    pub fn not<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        let criteria = Self::run(f);
        if !criteria.is_empty() {
            self.criteria.push(Criterion::Not(criteria));
        }
    }
}

/// Collects column assignments inside insert and update closures.
#[derive(Debug, Default)]
pub struct AssignmentScope {
    assignments: Vec<(ColumnRef, Operand)>,
}

impl AssignmentScope {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The collected assignments, in insertion order.
    #[must_use]
    pub fn assignments(&self) -> &[(ColumnRef, Operand)] {
        &self.assignments
    }

    pub(crate) fn into_assignments(self) -> Vec<(ColumnRef, Operand)> {
        self.assignments
    }

    /// Assigns a value to the column. `None` assigns NULL.
    pub fn set<V: ToSqlValue>(&mut self, column: &Column<V>, value: impl IntoOptionValue<V>) {
        let value = value.into_option_value().to_sql_value();
        self.assignments.push((
            column.as_ref().clone(),
            Operand::argument(column, value),
        ));
    }

    /// Assigns a value to the column only when one is present.
    pub fn set_if_not_null<V: ToSqlValue>(
        &mut self,
        column: &Column<V>,
        value: impl IntoOptionValue<V>,
    ) {
        if let Some(value) = value.into_option_value() {
            self.assignments.push((
                column.as_ref().clone(),
                Operand::argument(column, value.to_sql_value()),
            ));
        }
    }

    /// Assigns another column's value to the column.
    pub fn set_column<V>(&mut self, column: &Column<V>, value: &Column<V>) {
        self.assignments
            .push((column.as_ref().clone(), Operand::column(value)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metamodel::{integer, varchar, EntityMetamodel};

    fn fixture() -> (EntityMetamodel, Column<i32>, Column<String>) {
        let mut builder = EntityMetamodel::builder("Customer");
        let id = builder.column(integer("id").id());
        let name = builder.column(varchar("name", 50));
        (builder.build(), id, name)
    }

    #[test]
    fn test_none_adds_no_criterion() {
        let (_m, id, name) = fixture();
        let mut scope = FilterScope::new();
        scope.eq(&id, None::<i32>);
        scope.not_eq(&id, None::<i32>);
        scope.less(&id, None::<i32>);
        scope.greater_eq(&id, None::<i32>);
        scope.like(&name, None::<&str>);
        scope.not_like(&name, None::<&str>);
        scope.starts_with(&name, None::<&str>);
        assert!(scope.criteria().is_empty());
    }

    #[test]
    fn test_values_add_criteria_in_order() {
        let (_m, id, name) = fixture();
        let mut scope = FilterScope::new();
        scope.eq(&id, 1);
        scope.contains(&name, "ab");
        scope.between(&id, 1..=10);
        assert_eq!(scope.criteria().len(), 3);
        assert!(matches!(scope.criteria()[0], Criterion::Eq(..)));
        assert!(matches!(scope.criteria()[1], Criterion::Like(..)));
        assert!(matches!(scope.criteria()[2], Criterion::Between(..)));
    }

    #[test]
    fn test_empty_group_adds_nothing() {
        let (_m, id, _name) = fixture();
        let mut scope = FilterScope::new();
        scope.and(|s| s.eq(&id, None::<i32>));
        scope.or(|_s| {});
        scope.not(|_s| {});
        assert!(scope.criteria().is_empty());
    }

    #[test]
    fn test_assignment_none_assigns_null() {
        let (_m, _id, name) = fixture();
        let mut scope = AssignmentScope::new();
        scope.set(&name, None::<&str>);
        scope.set_if_not_null(&name, None::<&str>);
        assert_eq!(scope.assignments().len(), 1);
        assert!(matches!(
            &scope.assignments()[0].1,
            Operand::Argument(bound) if bound.value == crate::value::SqlValue::Null
        ));
    }
}
