//! Escaped LIKE patterns.
//!
//! User text going into a LIKE pattern is escaped so `%`, `_`, and the
//! escape character itself match literally; the wanted wildcards are
//! appended afterwards.

use crate::error::{Result, SqlError};

/// Escape character used when none is given.
pub const DEFAULT_ESCAPE_CHAR: char = '\\';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LikeMode {
    Raw,
    Prefix,
    Infix,
    Suffix,
}

/// A LIKE pattern together with its escape character.
#[derive(Debug, Clone)]
pub struct Like {
    pattern: String,
    escape: char,
    mode: LikeMode,
}

impl Like {
    /// Uses `text` as the pattern verbatim, without escaping.
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            pattern: text.into(),
            escape: DEFAULT_ESCAPE_CHAR,
            mode: LikeMode::Raw,
        }
    }

    /// Matches values starting with `text`.
    #[must_use]
    pub fn prefix(text: &str) -> Self {
        Self::build(text, DEFAULT_ESCAPE_CHAR, LikeMode::Prefix)
    }

    /// Matches values containing `text`.
    #[must_use]
    pub fn infix(text: &str) -> Self {
        Self::build(text, DEFAULT_ESCAPE_CHAR, LikeMode::Infix)
    }

    /// Matches values ending with `text`.
    #[must_use]
    pub fn suffix(text: &str) -> Self {
        Self::build(text, DEFAULT_ESCAPE_CHAR, LikeMode::Suffix)
    }

    /// Matches values starting with `text`, using a custom escape
    /// character.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::EscapeConflict`] when `escape` is `%` or
    /// `_`.
    pub fn prefix_with(text: &str, escape: char) -> Result<Self> {
        Self::check_escape(escape)?;
        Ok(Self::build(text, escape, LikeMode::Prefix))
    }

    /// Matches values containing `text`, using a custom escape
    /// character.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::EscapeConflict`] when `escape` is `%` or
    /// `_`.
    pub fn infix_with(text: &str, escape: char) -> Result<Self> {
        Self::check_escape(escape)?;
        Ok(Self::build(text, escape, LikeMode::Infix))
    }

    /// Matches values ending with `text`, using a custom escape
    /// character.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::EscapeConflict`] when `escape` is `%` or
    /// `_`.
    pub fn suffix_with(text: &str, escape: char) -> Result<Self> {
        Self::check_escape(escape)?;
        Ok(Self::build(text, escape, LikeMode::Suffix))
    }

    /// The pattern text, escaped and decorated with wildcards.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The escape character.
    #[must_use]
    pub const fn escape(&self) -> char {
        self.escape
    }

    /// Whether the pattern was escaped and needs an `escape` clause.
    #[must_use]
    pub const fn is_escaped(&self) -> bool {
        !matches!(self.mode, LikeMode::Raw)
    }

    fn check_escape(escape: char) -> Result<()> {
        if escape == '%' || escape == '_' {
            return Err(SqlError::EscapeConflict { escape });
        }
        Ok(())
    }

    fn build(text: &str, escape: char, mode: LikeMode) -> Self {
        let escaped = escape_text(text, escape);
        let pattern = match mode {
            LikeMode::Raw => escaped,
            LikeMode::Prefix => format!("{escaped}%"),
            LikeMode::Infix => format!("%{escaped}%"),
            LikeMode::Suffix => format!("%{escaped}"),
        };
        Self {
            pattern,
            escape,
            mode,
        }
    }
}

fn escape_text(text: &str, escape: char) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '%' || c == '_' || c == escape {
            escaped.push(escape);
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_is_untouched() {
        let like = Like::raw("50%");
        assert_eq!(like.pattern(), "50%");
        assert!(!like.is_escaped());
    }

    #[test]
    fn test_infix_escapes_wildcards() {
        let like = Like::infix("50%off");
        assert_eq!(like.pattern(), "%50\\%off%");
        assert_eq!(like.escape(), '\\');
        assert!(like.is_escaped());
    }

    #[test]
    fn test_prefix_and_suffix() {
        assert_eq!(Like::prefix("ab_c").pattern(), "ab\\_c%");
        assert_eq!(Like::suffix("a\\b").pattern(), "%a\\\\b");
    }

    #[test]
    fn test_custom_escape() {
        let like = Like::infix_with("50%off", '|').unwrap();
        assert_eq!(like.pattern(), "%50|%off%");
        assert_eq!(like.escape(), '|');
    }

    #[test]
    fn test_wildcard_escape_is_rejected() {
        let err = Like::prefix_with("a", '%').unwrap_err();
        assert!(matches!(err, SqlError::EscapeConflict { escape: '%' }));
        assert!(Like::suffix_with("a", '_').is_err());
    }
}
