//! Configuration error types.

use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors.
///
/// The raw [`VectorStoreConfig`] record never produces these on its own;
/// they come from binding external sources and from resolving the record
/// into [`VectorStoreOptions`].
///
/// [`VectorStoreConfig`]: crate::VectorStoreConfig
/// [`VectorStoreOptions`]: crate::VectorStoreOptions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A value could not be coerced to the field's type.
    #[error("invalid value '{value}' for '{key}': expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    /// The structured document has an unexpected shape.
    #[error("invalid configuration document: {0}")]
    InvalidDocument(String),

    /// The index name breaks Elasticsearch naming rules.
    #[error("invalid index name '{name}': {reason}")]
    InvalidIndexName { name: String, reason: &'static str },

    /// The dimensionality is outside the supported range.
    #[error("invalid dimensions {dimensions}: must be between 1 and {max}")]
    InvalidDimensions { dimensions: i64, max: usize },

    /// The similarity function name is not recognized.
    #[error("unsupported similarity function: {0}")]
    UnsupportedSimilarity(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ConfigError {
    /// Creates an invalid value error.
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            expected,
        }
    }

    /// Creates an invalid document error.
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Creates an invalid index name error.
    pub fn invalid_index_name(name: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidIndexName {
            name: name.into(),
            reason,
        }
    }

    /// Creates an invalid dimensions error.
    pub fn invalid_dimensions(dimensions: i64, max: usize) -> Self {
        Self::InvalidDimensions { dimensions, max }
    }

    /// Creates an unsupported similarity error.
    pub fn unsupported_similarity(name: impl Into<String>) -> Self {
        Self::UnsupportedSimilarity(name.into())
    }

    /// Creates a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Returns `true` if the error came from binding a source rather than
    /// from validating resolved values.
    pub fn is_binding_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidValue { .. } | Self::InvalidDocument(_) | Self::Serialization(_)
        )
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_message_names_key() {
        let err = ConfigError::invalid_value("dimensions", "abc", "an integer");
        assert_eq!(
            err.to_string(),
            "invalid value 'abc' for 'dimensions': expected an integer"
        );
        assert!(err.is_binding_error());
    }

    #[test]
    fn validation_errors_are_not_binding_errors() {
        assert!(!ConfigError::invalid_dimensions(0, 4096).is_binding_error());
        assert!(!ConfigError::unsupported_similarity("hamming").is_binding_error());
        assert!(!ConfigError::invalid_index_name("A", "must be lowercase").is_binding_error());
    }

    #[test]
    fn json_errors_convert() {
        let err: ConfigError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ConfigError::Serialization(_)));
    }
}
