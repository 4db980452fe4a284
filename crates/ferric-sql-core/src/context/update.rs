//! Update context.

use crate::expr::{AssignmentScope, Criterion, FilterScope, Operand};
use crate::metamodel::{ColumnRef, EntityMetamodel};

/// Accumulated description of an update statement.
#[derive(Debug, Clone)]
pub struct UpdateContext {
    target: EntityMetamodel,
    assignments: Vec<(ColumnRef, Operand)>,
    where_criteria: Vec<Criterion>,
}

impl UpdateContext {
    pub(crate) fn new(target: &EntityMetamodel) -> Self {
        Self {
            target: target.clone(),
            assignments: Vec::new(),
            where_criteria: Vec::new(),
        }
    }

    /// The updated entity.
    #[must_use]
    pub fn target(&self) -> &EntityMetamodel {
        &self.target
    }

    /// Column assignments in declaration order.
    #[must_use]
    pub fn assignments(&self) -> &[(ColumnRef, Operand)] {
        &self.assignments
    }

    /// Criteria of the `where` clause.
    #[must_use]
    pub fn where_criteria(&self) -> &[Criterion] {
        &self.where_criteria
    }

    /// Appends column assignments.
    #[must_use]
    pub fn set<F>(&self, f: F) -> Self
    where
        F: FnOnce(&mut AssignmentScope),
    {
        let mut scope = AssignmentScope::new();
        f(&mut scope);
        let mut context = self.clone();
        context.assignments.extend(scope.into_assignments());
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
}
