//! Introspection statements over `information_schema`.
//!
//! Callers feed the resulting name lists back into
//! [`should_create_missing_properties`] and the schema statement
//! builder. Schema and table names travel as bind arguments.
//!
//! [`should_create_missing_properties`]: ferric_sql_core::metamodel::EntityMetamodel::should_create_missing_properties

use ferric_sql_core::statement::{Statement, StatementBuffer};
use ferric_sql_core::value::SqlValue;

/// Statement counting catalog entries for a table, 0 or 1.
#[must_use]
pub fn table_exists(schema: &str, table: &str) -> Statement {
    let mut buf = StatementBuffer::new();
    buf.append("SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = ");
    buf.bind(SqlValue::Text(String::from(schema)));
    buf.append(" AND table_name = ");
    buf.bind(SqlValue::Text(String::from(table)));
    buf.into_statement()
}

/// Statement listing the column names of a table.
#[must_use]
pub fn table_columns(schema: &str, table: &str) -> Statement {
    let mut buf = StatementBuffer::new();
    buf.append("SELECT column_name FROM information_schema.columns WHERE table_schema = ");
    buf.bind(SqlValue::Text(String::from(schema)));
    buf.append(" AND table_name = ");
    buf.bind(SqlValue::Text(String::from(table)));
    buf.into_statement()
}

/// Statement listing the index names of a table, primary key excluded.
#[must_use]
pub fn table_indexes(schema: &str, table: &str) -> Statement {
    let mut buf = StatementBuffer::new();
    buf.append("SELECT index_name FROM information_schema.statistics WHERE table_schema = ");
    buf.bind(SqlValue::Text(String::from(schema)));
    buf.append(" AND table_name = ");
    buf.bind(SqlValue::Text(String::from(table)));
    buf.append(" AND index_name <> 'PRIMARY' GROUP BY index_name");
    buf.into_statement()
}
