#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod binder;
mod config;
mod error;
mod options;
mod similarity;

pub use binder::PROPERTIES_PREFIX;
pub use config::VectorStoreConfig;
pub use error::{ConfigError, ConfigResult};
pub use options::{VectorStoreOptions, validate_index_name};
pub use similarity::SimilarityFunction;

/// Tracing target for configuration resolution.
pub const TRACING_TARGET: &str = "esvector_config";
