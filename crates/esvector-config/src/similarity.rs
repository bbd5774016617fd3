//! Similarity functions supported by Elasticsearch `dense_vector` fields.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Similarity metric used to rank nearest neighbors.
///
/// Parsing is ASCII case-insensitive and accepts a few common aliases
/// (`l2`, `euclidean`, `dot`, ...). Formatting always yields the name
/// Elasticsearch expects in an index mapping.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityFunction {
    /// Cosine of the angle between vectors.
    #[default]
    Cosine,
    /// Euclidean (L2) distance.
    #[strum(
        to_string = "l2_norm",
        serialize = "l2",
        serialize = "l2-norm",
        serialize = "euclidean"
    )]
    #[serde(alias = "l2", alias = "l2-norm", alias = "euclidean")]
    L2Norm,
    /// Dot product; vectors must be normalized to unit length.
    #[strum(to_string = "dot_product", serialize = "dot", serialize = "dot-product")]
    #[serde(alias = "dot", alias = "dot-product")]
    DotProduct,
    /// Maximum inner product; vectors need not be normalized.
    #[strum(to_string = "max_inner_product", serialize = "max-inner-product")]
    #[serde(alias = "max-inner-product")]
    MaxInnerProduct,
}

impl SimilarityFunction {
    /// Returns `true` if the metric requires unit-length vectors.
    pub fn requires_normalized_vectors(self) -> bool {
        matches!(self, Self::DotProduct)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn parses_canonical_names() {
        for similarity in SimilarityFunction::iter() {
            let parsed = SimilarityFunction::from_str(similarity.as_ref()).unwrap();
            assert_eq!(parsed, similarity);
        }
    }

    #[test]
    fn parses_aliases_case_insensitively() {
        assert_eq!(
            "COSINE".parse::<SimilarityFunction>().unwrap(),
            SimilarityFunction::Cosine
        );
        assert_eq!(
            "Euclidean".parse::<SimilarityFunction>().unwrap(),
            SimilarityFunction::L2Norm
        );
        assert_eq!(
            "dot-product".parse::<SimilarityFunction>().unwrap(),
            SimilarityFunction::DotProduct
        );
        assert_eq!(
            "Max-Inner-Product".parse::<SimilarityFunction>().unwrap(),
            SimilarityFunction::MaxInnerProduct
        );
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("hamming".parse::<SimilarityFunction>().is_err());
        assert!("".parse::<SimilarityFunction>().is_err());
    }

    #[test]
    fn displays_elasticsearch_names() {
        assert_eq!(SimilarityFunction::Cosine.to_string(), "cosine");
        assert_eq!(SimilarityFunction::L2Norm.to_string(), "l2_norm");
        assert_eq!(SimilarityFunction::DotProduct.to_string(), "dot_product");
        assert_eq!(
            SimilarityFunction::MaxInnerProduct.to_string(),
            "max_inner_product"
        );
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&SimilarityFunction::L2Norm).unwrap();
        assert_eq!(json, "\"l2_norm\"");

        let parsed: SimilarityFunction = serde_json::from_str("\"euclidean\"").unwrap();
        assert_eq!(parsed, SimilarityFunction::L2Norm);
    }

    #[test]
    fn only_dot_product_requires_normalization() {
        assert!(SimilarityFunction::DotProduct.requires_normalized_vectors());
        assert!(!SimilarityFunction::Cosine.requires_normalized_vectors());
        assert!(!SimilarityFunction::MaxInnerProduct.requires_normalized_vectors());
    }
}
