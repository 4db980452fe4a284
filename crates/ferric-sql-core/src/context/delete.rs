//! Delete context.

use crate::expr::{Criterion, FilterScope};
use crate::metamodel::EntityMetamodel;

/// Accumulated description of a delete statement.
#[derive(Debug, Clone)]
pub struct DeleteContext {
    target: EntityMetamodel,
    where_criteria: Vec<Criterion>,
}

impl DeleteContext {
    pub(crate) fn new(target: &EntityMetamodel) -> Self {
        Self {
            target: target.clone(),
            where_criteria: Vec::new(),
        }
    }

    /// The deleted-from entity.
    #[must_use]
    pub fn target(&self) -> &EntityMetamodel {
        &self.target
    }

    /// Criteria of the `where` clause.
    #[must_use]
    pub fn where_criteria(&self) -> &[Criterion] {
        &self.where_criteria
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
