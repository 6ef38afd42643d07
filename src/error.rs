use thiserror::Error;

use crate::schema::BaseType;

/// Main error type for condex operations
#[derive(Error, Debug)]
pub enum CondexError {
    /// A condition, mapper or schema was built from invalid arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The condition names a field the schema has no mapper for
    #[error("No mapper found for field '{0}'")]
    UnresolvedField(String),

    /// The field's base type cannot satisfy the condition
    #[error("{condition} queries are not supported by {base_type} mapper")]
    UnsupportedCondition {
        condition: &'static str,
        base_type: BaseType,
    },

    /// A raw value could not be parsed into the mapper's base type
    #[error("Field '{field}' requires a {base_type} value: {message}")]
    TypeCoercion {
        field: String,
        base_type: BaseType,
        message: String,
    },

    /// A regexp or wildcard pattern could not be turned into a matcher
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for condex operations
pub type Result<T> = std::result::Result<T, CondexError>;

impl CondexError {
    /// Shorthand for [`CondexError::InvalidArgument`]
    pub fn invalid(message: impl Into<String>) -> Self {
        CondexError::InvalidArgument(message.into())
    }

    /// Shorthand for [`CondexError::TypeCoercion`]
    pub fn coercion(field: &str, base_type: BaseType, message: impl Into<String>) -> Self {
        CondexError::TypeCoercion {
            field: field.to_string(),
            base_type,
            message: message.into(),
        }
    }

    /// Check if the error was caused by the request rather than the schema
    ///
    /// Every variant except `UnresolvedField` and `UnsupportedCondition` means the
    /// caller sent a malformed request. Those two mean the request and the schema
    /// disagree, which is still a client error but worth reporting differently.
    pub fn is_malformed_request(&self) -> bool {
        matches!(
            self,
            CondexError::InvalidArgument(_)
                | CondexError::TypeCoercion { .. }
                | CondexError::InvalidPattern(_)
                | CondexError::Serialization(_)
        )
    }

    /// Check if the error comes from a schema/condition type mismatch
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(
            self,
            CondexError::UnresolvedField(_) | CondexError::UnsupportedCondition { .. }
        )
    }
}
