//! Template and script statement builders.

use tracing::debug;

use crate::context::{ScriptContext, TemplateContext};
use crate::error::{Result, SqlError};
use crate::statement::{BoundValue, Statement, StatementBuffer};

/// Renders a [`TemplateContext`] into a statement.
///
/// A `/*name*/literal` marker becomes a placeholder bound to the value
/// registered for `name`; the literal after the marker is a sample
/// value for running the template verbatim and is dropped. Block
/// comments whose body is not an identifier pass through untouched.
pub struct TemplateStatementBuilder<'a> {
    context: &'a TemplateContext,
}

impl<'a> TemplateStatementBuilder<'a> {
    #[must_use]
    pub fn new(context: &'a TemplateContext) -> Self {
        Self { context }
    }

    /// Builds the statement.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::UnboundVariable`] when a marker names a
    /// variable with no bound value.
    pub fn build(&self) -> Result<Statement> {
        let mut buf = StatementBuffer::new();
        let mut rest = self.context.sql();
        loop {
            let Some(start) = rest.find("/*") else {
                buf.append(rest);
                break;
            };
            let (before, marker) = rest.split_at(start);
            buf.append(before);
            let Some(end) = marker.find("*/") else {
                buf.append(marker);
                break;
            };
            let name = &marker[2..end];
            let after = &marker[end + 2..];
            if is_identifier(name) {
                let value = self
                    .context
                    .arg(name)
                    .ok_or_else(|| SqlError::UnboundVariable {
                        name: name.to_string(),
                    })?;
                buf.bind(BoundValue::new(value.clone()));
                rest = skip_sample_literal(after);
            } else {
                buf.append(&marker[..end + 2]);
                rest = after;
            }
        }
        let statement = buf.into_statement();
        debug!(sql = %statement.to_sql(), "Built template statement");
        Ok(statement)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Skips the sample value following a bind marker: a quoted string or
/// a run of characters up to whitespace, a comma, or a closing paren.
fn skip_sample_literal(rest: &str) -> &str {
    if let Some(quoted) = rest.strip_prefix('\'') {
        match quoted.find('\'') {
            Some(end) => &quoted[end + 1..],
            None => "",
        }
    } else {
        let end = rest
            .find(|c: char| c.is_whitespace() || c == ',' || c == ')')
            .unwrap_or(rest.len());
        &rest[end..]
    }
}

/// Renders a [`ScriptContext`] into a statement, verbatim.
pub struct ScriptStatementBuilder<'a> {
    context: &'a ScriptContext,
}

impl<'a> ScriptStatementBuilder<'a> {
    #[must_use]
    pub fn new(context: &'a ScriptContext) -> Self {
        Self { context }
    }

    /// Builds the statement.
    #[must_use]
    pub fn build(&self) -> Statement {
        Statement::from_text(self.context.sql())
    }
}
