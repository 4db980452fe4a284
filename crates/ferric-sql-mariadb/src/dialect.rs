//! MariaDB dialect implementation.

use ferric_sql_core::context::UpsertContext;
use ferric_sql_core::dialect::Dialect;
use ferric_sql_core::error::Result;
use ferric_sql_core::metamodel::ColumnType;
use ferric_sql_core::statement::Statement;

use crate::upsert::UpsertStatementBuilder;

/// MariaDB dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MariaDbDialect;

impl MariaDbDialect {
    /// Creates a new MariaDB dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MariaDbDialect {
    fn name(&self) -> &'static str {
        "mariadb"
    }

    fn enquote(&self, identifier: &str) -> String {
        format!("`{identifier}`")
    }

    fn data_type_name(&self, column_type: &ColumnType) -> String {
        match column_type {
            ColumnType::Boolean => String::from("boolean"),
            ColumnType::Integer | ColumnType::Enum { .. } => String::from("int"),
            ColumnType::BigInt => String::from("bigint"),
            ColumnType::Varchar(length) => format!("varchar({length})"),
            ColumnType::Text => String::from("text"),
            ColumnType::DateTime => String::from("datetime"),
        }
    }

    fn offset_limit(&self, offset: Option<u64>, limit: Option<u64>) -> String {
        // An offset cannot stand alone; the manual's catch-all limit
        // keeps the clause valid.
        match (offset, limit) {
            (None, None) => String::new(),
            (None, Some(limit)) => format!(" limit {limit}"),
            (Some(offset), None) => format!(" limit 18446744073709551615 offset {offset}"),
            (Some(offset), Some(limit)) => format!(" limit {limit} offset {offset}"),
        }
    }

    fn supports_upsert(&self) -> bool {
        true
    }

    fn upsert_statement(&self, context: &UpsertContext) -> Result<Statement> {
        Ok(UpsertStatementBuilder::new(self, context).build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mariadb_dialect() {
        let dialect = MariaDbDialect::new();
        assert_eq!(dialect.name(), "mariadb");
        assert_eq!(dialect.enquote("user"), "`user`");
        assert!(dialect.supports_upsert());
        assert!(dialect.supports_sequences());
        assert!(dialect.supports_inline_index_definitions());
    }

    #[test]
    fn test_data_type_names() {
        let dialect = MariaDbDialect::new();
        assert_eq!(dialect.data_type_name(&ColumnType::Integer), "int");
        assert_eq!(dialect.data_type_name(&ColumnType::BigInt), "bigint");
        assert_eq!(dialect.data_type_name(&ColumnType::Varchar(50)), "varchar(50)");
        assert_eq!(dialect.data_type_name(&ColumnType::DateTime), "datetime");
    }

    #[test]
    fn test_offset_limit_forms() {
        let dialect = MariaDbDialect::new();
        assert_eq!(dialect.offset_limit(None, None), "");
        assert_eq!(dialect.offset_limit(None, Some(5)), " limit 5");
        assert_eq!(dialect.offset_limit(Some(10), Some(5)), " limit 5 offset 10");
        assert_eq!(
            dialect.offset_limit(Some(10), None),
            " limit 18446744073709551615 offset 10"
        );
    }
}
