//! Standards-flavored dialect with no database-specific syntax.

use super::Dialect;

/// Dialect using standard SQL forms throughout.
///
/// Identifiers are double-quoted, paging uses `offset … rows` and
/// `fetch first … rows only`, and upserts are unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enquote_uses_double_quotes() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.enquote("customer"), "\"customer\"");
    }

    #[test]
    fn test_placeholder_is_positional_blind() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.placeholder(1), "?");
        assert_eq!(dialect.placeholder(7), "?");
    }

    #[test]
    fn test_offset_limit_standard_forms() {
        let dialect = GenericDialect::new();
        assert_eq!(
            dialect.offset_limit(Some(10), Some(5)),
            " offset 10 rows fetch first 5 rows only"
        );
        assert_eq!(dialect.offset_limit(Some(10), None), " offset 10 rows");
        assert_eq!(
            dialect.offset_limit(None, Some(5)),
            " fetch first 5 rows only"
        );
        assert_eq!(dialect.offset_limit(None, None), "");
    }

    #[test]
    fn test_capabilities() {
        let dialect = GenericDialect::new();
        assert!(dialect.supports_create_if_not_exists());
        assert!(dialect.supports_drop_if_exists());
        assert!(dialect.supports_sequences());
        assert!(dialect.supports_inline_index_definitions());
        assert!(!dialect.supports_upsert());
    }
}
