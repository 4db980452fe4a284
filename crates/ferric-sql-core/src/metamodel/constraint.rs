//! Table constraint metadata: foreign keys, unique keys, and indexes.

/// Referential action applied on delete or update of a referenced row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceOption {
    /// Reject the change.
    Restrict,
    /// Defer the check (same as restrict on most databases).
    NoAction,
    /// Propagate the change to referencing rows.
    Cascade,
    /// Set referencing columns to NULL.
    SetNull,
    /// Set referencing columns to their default.
    SetDefault,
}

impl ReferenceOption {
    /// Returns the SQL form of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// A foreign-key constraint declared on an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Constraint name.
    pub name: String,
    /// Referencing column on the declaring table.
    pub column: String,
    /// Referenced table name.
    pub referenced_table: String,
    /// Referenced column name.
    pub referenced_column: String,
    /// Action on delete of the referenced row.
    pub on_delete: ReferenceOption,
    /// Action on update of the referenced row.
    pub on_update: ReferenceOption,
}

/// A unique-key constraint declared on an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueKey {
    /// Constraint name.
    pub name: String,
    /// Covered column names.
    pub columns: Vec<String>,
}

/// Storage structure of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    /// Balanced-tree index.
    BTree,
    /// Hash index.
    Hash,
}

impl IndexType {
    /// Returns the SQL form of the index type.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::BTree => "BTREE",
            Self::Hash => "HASH",
        }
    }
}

/// A secondary index declared on an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Covered column names.
    pub columns: Vec<String>,
    /// Storage structure.
    pub index_type: IndexType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_option_sql() {
        assert_eq!(ReferenceOption::Restrict.as_sql(), "RESTRICT");
        assert_eq!(ReferenceOption::NoAction.as_sql(), "NO ACTION");
        assert_eq!(ReferenceOption::Cascade.as_sql(), "CASCADE");
        assert_eq!(ReferenceOption::SetNull.as_sql(), "SET NULL");
        assert_eq!(ReferenceOption::SetDefault.as_sql(), "SET DEFAULT");
    }

    #[test]
    fn test_index_type_sql() {
        assert_eq!(IndexType::BTree.as_sql(), "BTREE");
        assert_eq!(IndexType::Hash.as_sql(), "HASH");
    }
}
