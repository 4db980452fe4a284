//! Error types for statement construction.

/// Errors that can occur while building statements.
#[derive(Debug, thiserror::Error)]
pub enum SqlError {
    /// A stored enum ordinal has no matching variant.
    #[error("Cannot map the value {ordinal} to the '{property}' property of the {enum_type} enum")]
    EnumMapping {
        /// Name of the enum type being mapped.
        enum_type: &'static str,
        /// The property the value was read through.
        property: &'static str,
        /// The ordinal that failed to map.
        ordinal: usize,
    },

    /// A LIKE escape character collides with a wildcard.
    #[error("Escape character '{escape}' conflicts with the LIKE wildcards '%' and '_'")]
    EscapeConflict {
        /// The rejected escape character.
        escape: char,
    },

    /// The dialect does not support the requested feature.
    #[error("The {dialect} dialect does not support {feature}")]
    Unsupported {
        /// Dialect name.
        dialect: &'static str,
        /// Feature that was requested.
        feature: &'static str,
    },

    /// A template bind variable has no argument.
    #[error("The template variable '{name}' is not bound to a value")]
    UnboundVariable {
        /// Name of the unbound variable.
        name: String,
    },
}

/// Result type for statement construction.
pub type Result<T> = std::result::Result<T, SqlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SqlError::EnumMapping {
            enum_type: "Direction",
            property: "ordinal",
            ordinal: 9,
        };
        assert_eq!(
            err.to_string(),
            "Cannot map the value 9 to the 'ordinal' property of the Direction enum"
        );

        let err = SqlError::Unsupported {
            dialect: "sqlite",
            feature: "sequences",
        };
        assert_eq!(
            err.to_string(),
            "The sqlite dialect does not support sequences"
        );
    }
}
