//! Template and script contexts for raw SQL.

use std::collections::HashMap;

use crate::value::{SqlValue, ToSqlValue};

/// Raw SQL with `/*name*/literal` bind-variable markers and the values
/// bound to them.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    sql: String,
    args: HashMap<String, SqlValue>,
}

impl TemplateContext {
    pub(crate) fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: HashMap::new(),
        }
    }

    /// The template SQL.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bound value for `name`, when present.
    #[must_use]
    pub fn arg(&self, name: &str) -> Option<&SqlValue> {
        self.args.get(name)
    }

    /// Binds a value to a template variable.
    #[must_use]
    pub fn bind(&self, name: impl Into<String>, value: impl ToSqlValue) -> Self {
        let mut context = self.clone();
        context.args.insert(name.into(), value.to_sql_value());
        context
    }
}

/// Raw SQL passed through without inspection.
#[derive(Debug, Clone)]
pub struct ScriptContext {
    sql: String,
}

impl ScriptContext {
    pub(crate) fn new(sql: impl Into<String>) -> Self {
        Self { sql: sql.into() }
    }

    /// The script SQL.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }
}
