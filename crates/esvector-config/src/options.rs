//! Resolved, validated settings handed to a vector store client.

use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET;
use crate::config::VectorStoreConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::similarity::SimilarityFunction;

/// Characters Elasticsearch forbids anywhere in an index name.
const FORBIDDEN_INDEX_CHARS: &[char] = &[
    '\\', '/', '*', '?', '"', '<', '>', '|', ' ', ',', '#', ':',
];

/// Vector store settings with defaults applied and values checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VectorStoreOptions {
    /// Index holding the documents and their embeddings.
    pub index_name: String,
    /// Width of each embedding vector.
    pub dimensions: usize,
    /// Whether embeddings are stored as indexed `dense_vector` fields.
    pub dense_vector_indexing: bool,
    /// Metric used for nearest-neighbor ranking.
    pub similarity: SimilarityFunction,
}

impl VectorStoreOptions {
    /// Index used when none is configured.
    pub const DEFAULT_INDEX_NAME: &'static str = "spring-ai-document-index";
    /// Dimensions used when none are configured.
    pub const DEFAULT_DIMENSIONS: usize = 1536;
    /// Largest dimensionality Elasticsearch accepts for `dense_vector`.
    pub const MAX_DIMENSIONS: usize = 4096;
    /// Maximum index name length in bytes.
    pub const MAX_INDEX_NAME_BYTES: usize = 255;

    /// Checks all values against Elasticsearch's constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_index_name(&self.index_name)?;

        if !(1..=Self::MAX_DIMENSIONS).contains(&self.dimensions) {
            return Err(ConfigError::invalid_dimensions(
                i64::try_from(self.dimensions).unwrap_or(i64::MAX),
                Self::MAX_DIMENSIONS,
            ));
        }

        Ok(())
    }
}

impl Default for VectorStoreOptions {
    fn default() -> Self {
        Self {
            index_name: Self::DEFAULT_INDEX_NAME.to_owned(),
            dimensions: Self::DEFAULT_DIMENSIONS,
            dense_vector_indexing: true,
            similarity: SimilarityFunction::default(),
        }
    }
}

impl VectorStoreConfig {
    /// Applies defaults to unset fields and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the index name breaks Elasticsearch naming rules,
    /// the dimensions are outside `1..=4096`, or the similarity name is not a
    /// known [`SimilarityFunction`].
    pub fn resolve(&self) -> ConfigResult<VectorStoreOptions> {
        let defaults = VectorStoreOptions::default();

        let index_name = match self.index_name() {
            Some(name) => name.to_owned(),
            None => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    index_name = %defaults.index_name,
                    "index name not configured, using default"
                );
                defaults.index_name
            }
        };

        let dimensions = match self.dimensions() {
            Some(dimensions) => usize::try_from(dimensions).map_err(|_| {
                ConfigError::invalid_dimensions(
                    i64::from(dimensions),
                    VectorStoreOptions::MAX_DIMENSIONS,
                )
            })?,
            None => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    dimensions = defaults.dimensions,
                    "dimensions not configured, using default"
                );
                defaults.dimensions
            }
        };

        let similarity = match self.similarity() {
            Some(name) => name
                .trim()
                .parse::<SimilarityFunction>()
                .map_err(|_| ConfigError::unsupported_similarity(name))?,
            None => defaults.similarity,
        };

        let options = VectorStoreOptions {
            index_name,
            dimensions,
            dense_vector_indexing: self
                .is_dense_vector_indexing()
                .unwrap_or(defaults.dense_vector_indexing),
            similarity,
        };

        options.validate()?;
        Ok(options)
    }
}

/// Checks `name` against Elasticsearch index naming rules.
pub fn validate_index_name(name: &str) -> ConfigResult<()> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name == "." || name == ".." {
        Some("must not be '.' or '..'")
    } else if name.len() > VectorStoreOptions::MAX_INDEX_NAME_BYTES {
        Some("must not be longer than 255 bytes")
    } else if name.starts_with(['-', '_', '+']) {
        Some("must not start with '-', '_' or '+'")
    } else if name.chars().any(|c| c.is_uppercase()) {
        Some("must be lowercase")
    } else if name.contains(FORBIDDEN_INDEX_CHARS) {
        Some("must not contain spaces or any of \\ / * ? \" < > | , # :")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ConfigError::invalid_index_name(name, reason)),
        None => Ok(()),
    }
}
