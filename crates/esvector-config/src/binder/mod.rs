//! Binding of external configuration sources onto [`VectorStoreConfig`].
//!
//! Three kinds of source are supported, all funnelled through the same
//! relaxed key matching and coercion rules:
//!
//! - plain `(key, value)` string pairs, see [`VectorStoreConfig::bind`];
//! - environment variables, see [`VectorStoreConfig::from_env`];
//! - structured JSON documents, see [`VectorStoreConfig::from_json`].
//!
//! ```rust
//! use esvector_config::{PROPERTIES_PREFIX, VectorStoreConfig};
//!
//! let config = VectorStoreConfig::bind(
//!     [
//!         ("spring.ai.vectorstore.elasticsearch.index-name", "docs"),
//!         ("spring.ai.vectorstore.elasticsearch.dimensions", "768"),
//!     ],
//!     PROPERTIES_PREFIX,
//! )
//! .unwrap();
//!
//! assert_eq!(config.index_name(), Some("docs"));
//! assert_eq!(config.dimensions(), Some(768));
//! ```

mod coerce;
mod document;
mod key;

#[cfg(feature = "config")]
pub(crate) use self::coerce::{dense_vector_indexing_flag, dimensions_flag};

use serde_json::Value;

use self::key::{PropertyKey, normalize_segment};
use crate::config::VectorStoreConfig;
use crate::error::ConfigResult;

/// Namespace under which the vector store settings live.
pub const PROPERTIES_PREFIX: &str = "spring.ai.vectorstore.elasticsearch";

/// Tracing target for binding operations.
const TRACING_TARGET: &str = "esvector_config::binder";

/// Settings addressable under the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    IndexName,
    Dimensions,
    DenseVectorIndexing,
    Similarity,
}

impl Field {
    pub(crate) const ALL: [Self; 4] = [
        Self::IndexName,
        Self::Dimensions,
        Self::DenseVectorIndexing,
        Self::Similarity,
    ];

    /// Canonical (kebab-case) key relative to the prefix.
    pub(crate) fn key(self) -> &'static str {
        match self {
            Self::IndexName => "index-name",
            Self::Dimensions => "dimensions",
            Self::DenseVectorIndexing => "dense-vector-indexing",
            Self::Similarity => "similarity",
        }
    }

    fn lookup(remainder: &[String]) -> Option<Self> {
        let [segment] = remainder else {
            return None;
        };
        Self::ALL
            .into_iter()
            .find(|field| normalize_segment(field.key()) == *segment)
    }
}

/// A single value offered by a source, with the name used in diagnostics.
struct SourceEntry {
    name: String,
    key: PropertyKey,
    value: String,
}

impl VectorStoreConfig {
    /// Binds `(key, value)` pairs found under `prefix`.
    ///
    /// Keys match with relaxed rules (case and `-`/`_` are ignored within a
    /// segment). Keys outside the prefix and unknown keys inside it are
    /// skipped. When several entries address the same field the last one
    /// wins.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a value cannot be coerced to
    /// its field's type.
    ///
    /// [`ConfigError::InvalidValue`]: crate::ConfigError::InvalidValue
    pub fn bind<I, K, V>(entries: I, prefix: &str) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let entries = entries.into_iter().map(|(key, value)| {
            let name = key.as_ref().to_owned();
            SourceEntry {
                key: PropertyKey::parse(&name),
                name,
                value: value.as_ref().to_owned(),
            }
        });

        Self::bind_entries(entries, prefix)
    }

    /// Binds `(key, value)` pairs under [`PROPERTIES_PREFIX`].
    pub fn from_properties<I, K, V>(entries: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::bind(entries, PROPERTIES_PREFIX)
    }

    /// Binds the process environment under [`PROPERTIES_PREFIX`].
    ///
    /// Variables that are not valid unicode are skipped.
    pub fn from_env() -> ConfigResult<Self> {
        let vars = std::env::vars_os().filter_map(|(name, value)| {
            Some((name.into_string().ok()?, value.into_string().ok()?))
        });
        Self::bind_env(vars)
    }

    /// Binds environment-style variables under [`PROPERTIES_PREFIX`].
    ///
    /// See [`VectorStoreConfig::bind_env_with_prefix`].
    pub fn bind_env<I, K, V>(vars: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::bind_env_with_prefix(vars, PROPERTIES_PREFIX)
    }

    /// Binds environment-style variables under `prefix`.
    ///
    /// The prefix maps to its upper-case, underscore separated form
    /// (`spring.ai.vectorstore.elasticsearch` becomes
    /// `SPRING_AI_VECTORSTORE_ELASTICSEARCH_`) and the rest of the variable
    /// name addresses the field, so both `..._INDEX_NAME` and `..._INDEXNAME`
    /// set the index name. Variables are applied in name order.
    pub fn bind_env_with_prefix<I, K, V>(vars: I, prefix: &str) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let env_prefix = PropertyKey::parse(prefix).env_prefix();

        let mut entries: Vec<SourceEntry> = vars
            .into_iter()
            .filter_map(|(name, value)| {
                let name = name.as_ref();
                let remainder = strip_prefix_ignore_ascii_case(name, &env_prefix)?;
                Some(SourceEntry {
                    key: PropertyKey::parse(&format!("{prefix}.{remainder}")),
                    name: name.to_owned(),
                    value: value.as_ref().to_owned(),
                })
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Self::bind_entries(entries, prefix)
    }

    /// Binds a structured JSON document under `prefix`.
    ///
    /// Nested objects and dotted keys may be mixed; both of these bind the
    /// same index name:
    ///
    /// ```json
    /// { "spring": { "ai": { "vectorstore": { "elasticsearch": { "index-name": "docs" } } } } }
    /// { "spring.ai.vectorstore.elasticsearch": { "indexName": "docs" } }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDocument`] if the root is not an object
    /// or an array appears under the prefix, and [`ConfigError::InvalidValue`]
    /// on coercion failure.
    ///
    /// [`ConfigError::InvalidDocument`]: crate::ConfigError::InvalidDocument
    /// [`ConfigError::InvalidValue`]: crate::ConfigError::InvalidValue
    pub fn from_json(document: &Value, prefix: &str) -> ConfigResult<Self> {
        let entries = document::flatten(document, &PropertyKey::parse(prefix))?;
        Self::bind(entries, prefix)
    }

    /// Parses `json` and binds it with [`VectorStoreConfig::from_json`].
    pub fn from_json_str(json: &str, prefix: &str) -> ConfigResult<Self> {
        let document: Value = serde_json::from_str(json)?;
        Self::from_json(&document, prefix)
    }

    /// Returns the set fields as fully qualified canonical keys.
    ///
    /// Binding the result with the same prefix reproduces `self`.
    pub fn entries(&self, prefix: &str) -> Vec<(String, String)> {
        let qualify = |field: Field| {
            if prefix.is_empty() {
                field.key().to_owned()
            } else {
                format!("{prefix}.{}", field.key())
            }
        };

        Field::ALL
            .into_iter()
            .filter_map(|field| {
                let value = match field {
                    Field::IndexName => self.index_name.clone(),
                    Field::Dimensions => self.dimensions.map(|d| d.to_string()),
                    Field::DenseVectorIndexing => self.dense_vector_indexing.map(|b| b.to_string()),
                    Field::Similarity => self.similarity.clone(),
                }?;
                Some((qualify(field), value))
            })
            .collect()
    }

    fn bind_entries(
        entries: impl IntoIterator<Item = SourceEntry>,
        prefix: &str,
    ) -> ConfigResult<Self> {
        let prefix_key = PropertyKey::parse(prefix);
        let mut config = Self::default();
        let mut bound = 0_usize;

        for entry in entries {
            let Some(remainder) = entry.key.strip_prefix(&prefix_key) else {
                continue;
            };

            let Some(field) = Field::lookup(remainder) else {
                tracing::debug!(
                    target: TRACING_TARGET,
                    key = %entry.name,
                    "ignoring unknown property"
                );
                continue;
            };

            config.apply(field, &entry.name, &entry.value)?;
            bound += 1;
        }

        tracing::debug!(
            target: TRACING_TARGET,
            prefix = %prefix,
            bound = bound,
            "bound vector store properties"
        );

        Ok(config)
    }

    fn apply(&mut self, field: Field, name: &str, value: &str) -> ConfigResult<()> {
        match field {
            Field::IndexName => self.index_name = Some(value.to_owned()),
            Field::Dimensions => self.dimensions = coerce::parse_integer(name, value)?,
            Field::DenseVectorIndexing => {
                self.dense_vector_indexing = coerce::parse_boolean(name, value)?;
            }
            Field::Similarity => self.similarity = Some(value.to_owned()),
        }
        Ok(())
    }
}

fn strip_prefix_ignore_ascii_case<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let head = name.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &name[prefix.len()..])
}
