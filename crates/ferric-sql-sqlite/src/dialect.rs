//! SQLite dialect implementation.

use ferric_sql_core::context::UpsertContext;
use ferric_sql_core::dialect::Dialect;
use ferric_sql_core::error::Result;
use ferric_sql_core::metamodel::ColumnType;
use ferric_sql_core::statement::Statement;

use crate::upsert::UpsertStatementBuilder;

/// SQLite dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn data_type_name(&self, column_type: &ColumnType) -> String {
        // Integer columns are 64-bit regardless of declared width.
        match column_type {
            ColumnType::Boolean => String::from("boolean"),
            ColumnType::Integer | ColumnType::BigInt | ColumnType::Enum { .. } => {
                String::from("integer")
            }
            ColumnType::Varchar(length) => format!("varchar({length})"),
            ColumnType::Text => String::from("text"),
            ColumnType::DateTime => String::from("timestamp"),
        }
    }

    fn supports_sequences(&self) -> bool {
        false
    }

    fn supports_inline_index_definitions(&self) -> bool {
        false
    }

    fn auto_increment_keyword(&self) -> &'static str {
        "autoincrement"
    }

    fn offset_limit(&self, offset: Option<u64>, limit: Option<u64>) -> String {
        // A negative limit means unbounded, which covers offset-only
        // paging.
        match (offset, limit) {
            (None, None) => String::new(),
            (None, Some(limit)) => format!(" limit {limit}"),
            (Some(offset), None) => format!(" limit -1 offset {offset}"),
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
