//! Table alias assignment.

use std::collections::HashMap;

use crate::context::Join;
use crate::metamodel::{EntityMetamodel, MetamodelId};

/// Assigns `t{index}_` aliases to the target and joined entities of a
/// query, keyed by metamodel identity.
///
/// Subqueries use [`child`](Self::child) managers that continue the
/// running index and fall back to the parent for outer references.
#[derive(Debug)]
pub struct AliasManager<'a> {
    aliases: HashMap<MetamodelId, String>,
    index: usize,
    parent: Option<&'a AliasManager<'a>>,
}

impl<'a> AliasManager<'a> {
    /// Creates a manager for a target and its joins, starting at
    /// `t0_`.
    #[must_use]
    pub fn new(target: &EntityMetamodel, joins: &[Join]) -> Self {
        Self::assign(target, joins, None)
    }

    /// Creates a manager for a subquery, continuing the parent's index
    /// and chaining lookups to it.
    #[must_use]
    pub fn child(target: &EntityMetamodel, joins: &[Join], parent: &'a AliasManager<'a>) -> Self {
        Self::assign(target, joins, Some(parent))
    }

    fn assign(
        target: &EntityMetamodel,
        joins: &[Join],
        parent: Option<&'a AliasManager<'a>>,
    ) -> Self {
        let mut index = parent.map_or(0, |p| p.index);
        let mut aliases = HashMap::new();
        aliases.insert(target.id(), format!("t{index}_"));
        index += 1;
        for join in joins {
            aliases.insert(join.target.id(), format!("t{index}_"));
            index += 1;
        }
        Self {
            aliases,
            index,
            parent,
        }
    }

    /// Looks up the alias for a metamodel, falling back to parent
    /// managers.
    #[must_use]
    pub fn alias(&self, id: MetamodelId) -> Option<&str> {
        self.aliases
            .get(&id)
            .map(String::as_str)
            .or_else(|| self.parent.and_then(|p| p.alias(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::JoinKind;
    use crate::metamodel::{integer, EntityMetamodel};

    fn entity(name: &str) -> EntityMetamodel {
        let mut builder = EntityMetamodel::builder(name);
        let _id = builder.column(integer("id").id());
        builder.build()
    }

    #[test]
    fn test_aliases_follow_declaration_order() {
        let a = entity("A");
        let b = entity("B");
        let joins = vec![Join {
            kind: JoinKind::Inner,
            target: b.clone(),
            criteria: Vec::new(),
        }];
        let manager = AliasManager::new(&a, &joins);
        assert_eq!(manager.alias(a.id()), Some("t0_"));
        assert_eq!(manager.alias(b.id()), Some("t1_"));
    }

    #[test]
    fn test_child_continues_index_and_chains_lookups() {
        let outer = entity("Outer");
        let inner = entity("Inner");
        let parent = AliasManager::new(&outer, &[]);
        let child = AliasManager::child(&inner, &[], &parent);
        assert_eq!(child.alias(inner.id()), Some("t1_"));
        assert_eq!(child.alias(outer.id()), Some("t0_"));
        assert_eq!(parent.alias(inner.id()), None);
    }
}
