//! SQL dialect abstraction.
//!
//! A dialect supplies everything database-specific about rendering:
//! identifier quoting, data type names, placeholder syntax, paging
//! syntax, capability flags, and upsert statements. Builders take a
//! `&dyn Dialect` and stay database-agnostic.

mod generic;

pub use generic::GenericDialect;

use crate::context::UpsertContext;
use crate::error::{Result, SqlError};
use crate::metamodel::ColumnType;
use crate::statement::Statement;
use crate::value::SqlValue;

/// Database-specific rendering policy.
pub trait Dialect {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Quotes an identifier.
    fn enquote(&self, identifier: &str) -> String {
        format!("\"{identifier}\"")
    }

    /// Returns the DDL type name for a column type.
    fn data_type_name(&self, column_type: &ColumnType) -> String {
        match column_type {
            ColumnType::Boolean => String::from("boolean"),
            ColumnType::Integer | ColumnType::Enum { .. } => String::from("integer"),
            ColumnType::BigInt => String::from("bigint"),
            ColumnType::Varchar(length) => format!("varchar({length})"),
            ColumnType::Text => String::from("text"),
            ColumnType::DateTime => String::from("timestamp"),
        }
    }

    /// Returns the literal form of a value for debug SQL.
    fn format_value(&self, value: &SqlValue) -> String {
        value.to_sql_inline()
    }

    /// Returns the placeholder for the 1-based bind position.
    fn placeholder(&self, position: usize) -> String {
        let _ = position;
        String::from("?")
    }

    /// Whether `create table if not exists` is supported.
    fn supports_create_if_not_exists(&self) -> bool {
        true
    }

    /// Whether `drop table if exists` is supported.
    fn supports_drop_if_exists(&self) -> bool {
        true
    }

    /// Whether sequences are supported.
    fn supports_sequences(&self) -> bool {
        true
    }

    /// Whether index definitions may appear inside `create table`.
    ///
    /// Dialects answering false get separate `create index` statements.
    fn supports_inline_index_definitions(&self) -> bool {
        true
    }

    /// Keyword marking an auto-increment column in DDL.
    fn auto_increment_keyword(&self) -> &'static str {
        "auto_increment"
    }

    /// Renders the paging suffix of a select statement.
    ///
    /// The default uses the standard `offset … rows` and
    /// `fetch first … rows only` forms.
    fn offset_limit(&self, offset: Option<u64>, limit: Option<u64>) -> String {
        let mut sql = String::new();
        if let Some(offset) = offset {
            sql.push_str(&format!(" offset {offset} rows"));
        }
        if let Some(limit) = limit {
            sql.push_str(&format!(" fetch first {limit} rows only"));
        }
        sql
    }

    /// Whether upsert statements are supported.
    fn supports_upsert(&self) -> bool {
        false
    }

    /// Renders an upsert statement.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Unsupported`] unless the dialect overrides
    /// this with its own syntax.
    fn upsert_statement(&self, context: &UpsertContext) -> Result<Statement> {
        let _ = context;
        Err(SqlError::Unsupported {
            dialect: self.name(),
            feature: "upsert statements",
        })
    }
}
