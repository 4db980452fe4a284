//! Schema DDL context.

use crate::metamodel::EntityMetamodel;

/// Entities covered by a schema create or drop operation.
#[derive(Debug, Clone)]
pub struct SchemaContext {
    metamodels: Vec<EntityMetamodel>,
    with_foreign_keys: bool,
}

impl SchemaContext {
    pub(crate) fn new(metamodels: &[&EntityMetamodel], with_foreign_keys: bool) -> Self {
        Self {
            metamodels: metamodels.iter().map(|m| (*m).clone()).collect(),
            with_foreign_keys,
        }
    }

    /// Covered entities, in order.
    #[must_use]
    pub fn metamodels(&self) -> &[EntityMetamodel] {
        &self.metamodels
    }

    /// Whether create statements declare foreign keys.
    #[must_use]
    pub const fn with_foreign_keys(&self) -> bool {
        self.with_foreign_keys
    }
}
