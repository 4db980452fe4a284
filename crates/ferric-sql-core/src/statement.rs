//! Rendered statements and the buffer that assembles them.
//!
//! A [`Statement`] keeps SQL text and bind arguments as an ordered part
//! list, so the same statement can be rendered with `?` placeholders,
//! dialect-specific placeholders, or inlined literals for debugging.

use crate::dialect::Dialect;
use crate::value::SqlValue;

const MASKED_VALUE: &str = "*****";

/// A bind argument together with its masking policy.
///
/// Values bound through a masked property render as `*****` in debug
/// SQL instead of their literal form.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundValue {
    /// The bound value.
    pub value: SqlValue,
    /// Whether debug SQL hides the value.
    pub masking: bool,
}

impl BoundValue {
    /// Creates an unmasked bind argument.
    #[must_use]
    pub const fn new(value: SqlValue) -> Self {
        Self {
            value,
            masking: false,
        }
    }

    /// Creates a masked bind argument.
    #[must_use]
    pub const fn masked(value: SqlValue) -> Self {
        Self {
            value,
            masking: true,
        }
    }
}

impl From<SqlValue> for BoundValue {
    fn from(value: SqlValue) -> Self {
        Self::new(value)
    }
}

/// One piece of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementPart {
    /// Literal SQL text.
    Text(String),
    /// A bind-argument placeholder.
    Placeholder(BoundValue),
}

/// An ordered list of text and placeholder parts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statement {
    parts: Vec<StatementPart>,
}

impl Statement {
    /// Creates a statement from raw SQL with no bind arguments.
    #[must_use]
    pub fn from_text(sql: impl Into<String>) -> Self {
        Self {
            parts: vec![StatementPart::Text(sql.into())],
        }
    }

    /// Returns the ordered parts.
    #[must_use]
    pub fn parts(&self) -> &[StatementPart] {
        &self.parts
    }

    /// Returns true when the statement holds no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns the SQL text with every placeholder rendered as `?`.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = String::new();
        for part in &self.parts {
            match part {
                StatementPart::Text(text) => sql.push_str(text),
                StatementPart::Placeholder(_) => sql.push('?'),
            }
        }
        sql
    }

    /// Returns the SQL text with dialect-specific placeholders.
    ///
    /// Placeholder positions are 1-based and count up in part order.
    #[must_use]
    pub fn to_sql_with(&self, dialect: &dyn Dialect) -> String {
        let mut sql = String::new();
        let mut position = 0;
        for part in &self.parts {
            match part {
                StatementPart::Text(text) => sql.push_str(text),
                StatementPart::Placeholder(_) => {
                    position += 1;
                    sql.push_str(&dialect.placeholder(position));
                }
            }
        }
        sql
    }

    /// Returns the SQL text with every bind argument inlined as a
    /// literal. Masked arguments render as `*****`.
    #[must_use]
    pub fn to_debug_sql(&self) -> String {
        let mut sql = String::new();
        for part in &self.parts {
            match part {
                StatementPart::Text(text) => sql.push_str(text),
                StatementPart::Placeholder(bound) => {
                    if bound.masking {
                        sql.push_str(MASKED_VALUE);
                    } else {
                        sql.push_str(&bound.value.to_sql_inline());
                    }
                }
            }
        }
        sql
    }

    /// Returns the bind arguments in placeholder order.
    #[must_use]
    pub fn args(&self) -> Vec<&SqlValue> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                StatementPart::Text(_) => None,
                StatementPart::Placeholder(bound) => Some(&bound.value),
            })
            .collect()
    }
}

/// Append-only assembler for statements.
///
/// Text appended between binds coalesces into a single part, and
/// [`cut_back`](Self::cut_back) trims separators that turned out to be
/// trailing.
#[derive(Debug, Default)]
pub struct StatementBuffer {
    parts: Vec<StatementPart>,
    pending: String,
}

impl StatementBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends SQL text.
    pub fn append(&mut self, text: impl AsRef<str>) {
        self.pending.push_str(text.as_ref());
    }

    /// Appends a placeholder bound to `value`.
    pub fn bind(&mut self, value: impl Into<BoundValue>) {
        self.flush();
        self.parts.push(StatementPart::Placeholder(value.into()));
    }

    /// Removes the last `n` characters of pending text.
    pub fn cut_back(&mut self, n: usize) {
        for _ in 0..n {
            self.pending.pop();
        }
    }

    /// Splices a nested statement, preserving its bind order.
    pub fn append_statement(&mut self, statement: &Statement) {
        for part in statement.parts() {
            match part {
                StatementPart::Text(text) => self.pending.push_str(text),
                StatementPart::Placeholder(bound) => {
                    self.flush();
                    self.parts.push(StatementPart::Placeholder(bound.clone()));
                }
            }
        }
    }

    /// Finishes the buffer into a statement.
    #[must_use]
    pub fn into_statement(mut self) -> Statement {
        self.flush();
        Statement { parts: self.parts }
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            self.parts.push(StatementPart::Text(text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_coalesces_text() {
        let mut buf = StatementBuffer::new();
        buf.append("select ");
        buf.append("1");
        let statement = buf.into_statement();
        assert_eq!(statement.parts().len(), 1);
        assert_eq!(statement.to_sql(), "select 1");
    }

    #[test]
    fn test_buffer_bind_order() {
        let mut buf = StatementBuffer::new();
        buf.append("a = ");
        buf.bind(SqlValue::Int(1));
        buf.append(" and b = ");
        buf.bind(SqlValue::Text(String::from("x")));
        let statement = buf.into_statement();
        assert_eq!(statement.to_sql(), "a = ? and b = ?");
        assert_eq!(
            statement.args(),
            vec![&SqlValue::Int(1), &SqlValue::Text(String::from("x"))]
        );
    }

    #[test]
    fn test_buffer_cut_back() {
        let mut buf = StatementBuffer::new();
        buf.append("a, b, ");
        buf.cut_back(2);
        assert_eq!(buf.into_statement().to_sql(), "a, b");
    }

    #[test]
    fn test_buffer_splices_statement() {
        let mut inner = StatementBuffer::new();
        inner.append("select id from t where v = ");
        inner.bind(SqlValue::Int(9));
        let inner = inner.into_statement();

        let mut outer = StatementBuffer::new();
        outer.append("exists (");
        outer.append_statement(&inner);
        outer.append(")");
        let statement = outer.into_statement();
        assert_eq!(statement.to_sql(), "exists (select id from t where v = ?)");
        assert_eq!(statement.args(), vec![&SqlValue::Int(9)]);
    }

    #[test]
    fn test_debug_sql_inlines_and_masks() {
        let mut buf = StatementBuffer::new();
        buf.append("name = ");
        buf.bind(SqlValue::Text(String::from("O'Brien")));
        buf.append(" and secret = ");
        buf.bind(BoundValue::masked(SqlValue::Text(String::from("hunter2"))));
        let statement = buf.into_statement();
        assert_eq!(
            statement.to_debug_sql(),
            "name = 'O''Brien' and secret = *****"
        );
    }
}
