//! Raw vector store settings as supplied by external configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Elasticsearch vector store settings bound from
/// `spring.ai.vectorstore.elasticsearch.*`.
///
/// Every field is optional and independent. No validation happens here:
/// values are stored exactly as given and checked only when the record is
/// [resolved](VectorStoreConfig::resolve) for a client.
///
/// The record is built once at startup (see [`VectorStoreConfig::bind`] and
/// its sibling loaders, or the `config` feature's clap flags) and shared
/// read-only afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[cfg_attr(feature = "config", command(next_help_heading = "Elasticsearch vector store"))]
#[serde(rename_all = "kebab-case")]
#[must_use = "config does nothing unless you use it"]
pub struct VectorStoreConfig {
    /// Name of the index to store the vectors in.
    #[cfg_attr(feature = "config", arg(long = "index-name"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(alias = "indexName", alias = "index_name")]
    pub(crate) index_name: Option<String>,

    /// Number of dimensions in the vector.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "dimensions",
            allow_negative_numbers = true,
            value_parser = crate::binder::dimensions_flag
        )
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) dimensions: Option<i32>,

    /// Whether to use dense vector indexing.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "dense-vector-indexing",
            value_parser = crate::binder::dense_vector_indexing_flag
        )
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(alias = "denseVectorIndexing", alias = "dense_vector_indexing")]
    pub(crate) dense_vector_indexing: Option<bool>,

    /// Similarity function to use.
    #[cfg_attr(feature = "config", arg(long = "similarity"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) similarity: Option<String>,
}

impl VectorStoreConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index name, if set.
    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    /// Stores the index name as given.
    pub fn set_index_name(&mut self, index_name: impl Into<String>) {
        self.index_name = Some(index_name.into());
    }

    /// Returns the vector dimensions, if set.
    pub fn dimensions(&self) -> Option<i32> {
        self.dimensions
    }

    /// Stores the vector dimensions without range checks.
    pub fn set_dimensions(&mut self, dimensions: i32) {
        self.dimensions = Some(dimensions);
    }

    /// Returns whether dense vector indexing is enabled, if set.
    pub fn is_dense_vector_indexing(&self) -> Option<bool> {
        self.dense_vector_indexing
    }

    /// Stores whether dense vector indexing is used.
    pub fn set_dense_vector_indexing(&mut self, dense_vector_indexing: bool) {
        self.dense_vector_indexing = Some(dense_vector_indexing);
    }

    /// Returns the similarity function name, if set.
    pub fn similarity(&self) -> Option<&str> {
        self.similarity.as_deref()
    }

    /// Stores the similarity function name verbatim.
    pub fn set_similarity(&mut self, similarity: impl Into<String>) {
        self.similarity = Some(similarity.into());
    }

    /// Sets the index name.
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.set_index_name(index_name);
        self
    }

    /// Sets the vector dimensions.
    pub fn with_dimensions(mut self, dimensions: i32) -> Self {
        self.set_dimensions(dimensions);
        self
    }

    /// Sets whether dense vector indexing is used.
    pub fn with_dense_vector_indexing(mut self, dense_vector_indexing: bool) -> Self {
        self.set_dense_vector_indexing(dense_vector_indexing);
        self
    }

    /// Sets the similarity function name.
    pub fn with_similarity(mut self, similarity: impl Into<String>) -> Self {
        self.set_similarity(similarity);
        self
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.index_name.is_none()
            && self.dimensions.is_none()
            && self.dense_vector_indexing.is_none()
            && self.similarity.is_none()
    }

    /// Layers `overlay` on top of `self`.
    ///
    /// Fields set in `overlay` replace those in `self`; fields it leaves
    /// unset keep their current value.
    pub fn merge(self, overlay: Self) -> Self {
        Self {
            index_name: overlay.index_name.or(self.index_name),
            dimensions: overlay.dimensions.or(self.dimensions),
            dense_vector_indexing: overlay.dense_vector_indexing.or(self.dense_vector_indexing),
            similarity: overlay.similarity.or(self.similarity),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn default_has_no_values() {
        let config = VectorStoreConfig::default();
        assert_eq!(config.index_name(), None);
        assert_eq!(config.dimensions(), None);
        assert_eq!(config.is_dense_vector_indexing(), None);
        assert_eq!(config.similarity(), None);
        assert!(config.is_empty());
    }

    #[test]
    fn setters_round_trip() {
        let mut config = VectorStoreConfig::new();
        config.set_index_name("my-index");
        config.set_dimensions(1536);
        config.set_dense_vector_indexing(true);
        config.set_similarity("cosine");

        assert_eq!(config.index_name(), Some("my-index"));
        assert_eq!(config.dimensions(), Some(1536));
        assert_eq!(config.is_dense_vector_indexing(), Some(true));
        assert_eq!(config.similarity(), Some("cosine"));
        assert!(!config.is_empty());
    }

    #[test]
    fn setters_store_without_validation() {
        let mut config = VectorStoreConfig::new();
        config.set_index_name("");
        config.set_dimensions(-1);
        config.set_similarity("hamming");

        assert_eq!(config.index_name(), Some(""));
        assert_eq!(config.dimensions(), Some(-1));
        assert_eq!(config.similarity(), Some("hamming"));
    }

    #[test]
    fn last_write_wins() {
        let mut config = VectorStoreConfig::new();
        config.set_index_name("first");
        config.set_index_name("second");
        config.set_dimensions(3);
        config.set_dimensions(768);
        config.set_dense_vector_indexing(true);
        config.set_dense_vector_indexing(false);
        config.set_similarity("cosine");
        config.set_similarity("dot_product");

        assert_eq!(config.index_name(), Some("second"));
        assert_eq!(config.dimensions(), Some(768));
        assert_eq!(config.is_dense_vector_indexing(), Some(false));
        assert_eq!(config.similarity(), Some("dot_product"));
    }

    #[test]
    fn merge_prefers_overlay_values() {
        let base = VectorStoreConfig::new()
            .with_index_name("base")
            .with_dimensions(384)
            .with_similarity("cosine");
        let overlay = VectorStoreConfig::new()
            .with_index_name("overlay")
            .with_dense_vector_indexing(false);

        let merged = base.merge(overlay);
        assert_eq!(merged.index_name(), Some("overlay"));
        assert_eq!(merged.dimensions(), Some(384));
        assert_eq!(merged.is_dense_vector_indexing(), Some(false));
        assert_eq!(merged.similarity(), Some("cosine"));
    }

    #[test]
    fn concurrent_reads_see_constructed_values() {
        let config = Arc::new(
            VectorStoreConfig::new()
                .with_index_name("shared")
                .with_dimensions(1536)
                .with_dense_vector_indexing(true)
                .with_similarity("l2_norm"),
        );

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let config = Arc::clone(&config);
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        assert_eq!(config.index_name(), Some("shared"));
                        assert_eq!(config.dimensions(), Some(1536));
                        assert_eq!(config.is_dense_vector_indexing(), Some(true));
                        assert_eq!(config.similarity(), Some("l2_norm"));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn serializes_set_fields_in_kebab_case() {
        let config = VectorStoreConfig::new()
            .with_index_name("docs")
            .with_dense_vector_indexing(true);

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "index-name": "docs", "dense-vector-indexing": true })
        );
    }

    #[test]
    fn deserializes_camel_case_aliases() {
        let json = r#"{ "indexName": "docs", "dimensions": 8, "denseVectorIndexing": false }"#;
        let config: VectorStoreConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.index_name(), Some("docs"));
        assert_eq!(config.dimensions(), Some(8));
        assert_eq!(config.is_dense_vector_indexing(), Some(false));
        assert_eq!(config.similarity(), None);
    }
}
