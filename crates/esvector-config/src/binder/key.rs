//! Relaxed property key matching.
//!
//! Keys are compared segment by segment after normalization: ASCII case is
//! folded and `-`/`_` separators inside a segment are dropped, so
//! `index-name`, `indexName`, `index_name` and `INDEXNAME` are the same key.

/// A property key split into normalized segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PropertyKey {
    segments: Vec<String>,
}

impl PropertyKey {
    /// Parses a dotted key. Empty segments (`a..b`, leading or trailing dots)
    /// are skipped.
    pub fn parse(key: &str) -> Self {
        let segments = key
            .split('.')
            .map(normalize_segment)
            .filter(|segment| !segment.is_empty())
            .collect();
        Self { segments }
    }

    /// Returns the segments left after removing `prefix`, or `None` when this
    /// key is not inside the prefix.
    pub fn strip_prefix(&self, prefix: &PropertyKey) -> Option<&[String]> {
        self.segments.strip_prefix(prefix.segments.as_slice())
    }

    /// Returns `true` if this key equals `prefix` or lies beneath it.
    pub fn starts_with(&self, prefix: &PropertyKey) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Environment-variable form of the key, e.g. `SPRING_AI_VECTORSTORE_`.
    ///
    /// Includes a trailing underscore so it can be used directly as a
    /// variable name prefix.
    pub fn env_prefix(&self) -> String {
        let mut prefix = self
            .segments
            .iter()
            .map(|segment| segment.to_ascii_uppercase())
            .collect::<Vec<_>>()
            .join("_");
        if !prefix.is_empty() {
            prefix.push('_');
        }
        prefix
    }
}

/// Folds case and drops `-` and `_` from a single key segment.
pub(crate) fn normalize_segment(segment: &str) -> String {
    segment
        .trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_styles_normalize_equally() {
        let expected = PropertyKey::parse("spring.ai.index-name");
        assert_eq!(PropertyKey::parse("spring.ai.indexName"), expected);
        assert_eq!(PropertyKey::parse("SPRING.AI.INDEX_NAME"), expected);
        assert_eq!(PropertyKey::parse("spring..ai.indexname."), expected);
    }

    #[test]
    fn strip_prefix_returns_remainder() {
        let prefix = PropertyKey::parse("spring.ai.vectorstore.elasticsearch");
        let key = PropertyKey::parse("spring.ai.vectorstore.elasticsearch.index-name");
        assert_eq!(key.strip_prefix(&prefix), Some(&["indexname".to_owned()][..]));

        let outside = PropertyKey::parse("spring.ai.vectorstore.qdrant.index-name");
        assert_eq!(outside.strip_prefix(&prefix), None);
    }

    #[test]
    fn prefix_does_not_match_partial_segments() {
        let prefix = PropertyKey::parse("spring.ai.vector");
        let key = PropertyKey::parse("spring.ai.vectorstore.dimensions");
        assert!(!key.starts_with(&prefix));
    }

    #[test]
    fn env_prefix_uppercases_segments() {
        let prefix = PropertyKey::parse("spring.ai.vectorstore.elasticsearch");
        assert_eq!(prefix.env_prefix(), "SPRING_AI_VECTORSTORE_ELASTICSEARCH_");
        assert_eq!(PropertyKey::parse("").env_prefix(), "");
    }
}
