//! Insert and upsert contexts.

use crate::context::SelectContext;
use crate::expr::{AssignmentScope, Operand};
use crate::metamodel::{ColumnRef, EntityMetamodel};

/// Accumulated description of an insert statement.
///
/// Produced by [`dsl::insert`](crate::dsl::insert); rows come either
/// from explicit assignments or from a select source.
#[derive(Debug, Clone)]
pub struct InsertContext {
    target: EntityMetamodel,
    assignments: Vec<(ColumnRef, Operand)>,
    select_source: Option<Box<SelectContext>>,
}

impl InsertContext {
    pub(crate) fn new(target: &EntityMetamodel) -> Self {
        Self {
            target: target.clone(),
            assignments: Vec::new(),
            select_source: None,
        }
    }

    /// The inserted-into entity.
    #[must_use]
    pub fn target(&self) -> &EntityMetamodel {
        &self.target
    }

    /// Column assignments in declaration order.
    #[must_use]
    pub fn assignments(&self) -> &[(ColumnRef, Operand)] {
        &self.assignments
    }

    /// The select source, when rows come from a query.
    #[must_use]
    pub fn select_source(&self) -> Option<&SelectContext> {
        self.select_source.as_deref()
    }

    /// Appends column assignments.
    #[must_use]
    pub fn values<F>(&self, f: F) -> Self
    where
        F: FnOnce(&mut AssignmentScope),
    {
        let mut scope = AssignmentScope::new();
        f(&mut scope);
        let mut context = self.clone();
        context.assignments.extend(scope.into_assignments());
        context
    }

    /// Sources rows from a select query instead of explicit values.
    #[must_use]
    pub fn from_select(&self, select: &SelectContext) -> Self {
        let mut context = self.clone();
        context.select_source = Some(Box::new(select.clone()));
        context
    }

    /// Turns the insert into an upsert updating the conflicting row.
    ///
    /// Empty `keys` fall back to the target's identifier columns.
    #[must_use]
    pub fn on_duplicate_key_update(&self, keys: &[&str]) -> UpsertContext {
        UpsertContext::new(self, keys, DuplicateKeyType::Update)
    }

    /// Turns the insert into an upsert ignoring the conflicting row.
    ///
    /// Empty `keys` fall back to the target's identifier columns.
    #[must_use]
    pub fn on_duplicate_key_ignore(&self, keys: &[&str]) -> UpsertContext {
        UpsertContext::new(self, keys, DuplicateKeyType::Ignore)
    }
}

/// What an upsert does with a conflicting row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKeyType {
    /// Update the conflicting row.
    Update,
    /// Leave the conflicting row untouched.
    Ignore,
}

/// An insert plus its duplicate-key policy.
#[derive(Debug, Clone)]
pub struct UpsertContext {
    insert: InsertContext,
    keys: Vec<String>,
    duplicate_key_type: DuplicateKeyType,
}

impl UpsertContext {
    fn new(insert: &InsertContext, keys: &[&str], duplicate_key_type: DuplicateKeyType) -> Self {
        let keys = if keys.is_empty() {
            insert
                .target()
                .id_properties()
                .iter()
                .map(|p| p.column_name.clone())
                .collect()
        } else {
            keys.iter().map(|k| (*k).to_string()).collect()
        };
        Self {
            insert: insert.clone(),
            keys,
            duplicate_key_type,
        }
    }

    /// The wrapped insert.
    #[must_use]
    pub fn insert(&self) -> &InsertContext {
        &self.insert
    }

    /// Conflict key column names.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The duplicate-key policy.
    #[must_use]
    pub const fn duplicate_key_type(&self) -> DuplicateKeyType {
        self.duplicate_key_type
    }
}
