//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── config_file: Option<PathBuf>   # JSON document, lowest precedence
//! ├── format: OutputFormat           # json | properties
//! ├── raw: bool                      # skip defaults and validation
//! └── store: VectorStoreConfig       # --index-name, --dimensions, ...
//! ```
//!
//! Sources are layered from lowest to highest precedence: the JSON file
//! (`--config` or `ESVECTOR_CONFIG_FILE`), environment variables bound with
//! the library's relaxed rules (`SPRING_AI_VECTORSTORE_ELASTICSEARCH_*`),
//! then command-line flags.
//!
//! # Example
//!
//! ```bash
//! esvector --config ./vectorstore.json --dimensions 768
//!
//! # Or via environment variables
//! SPRING_AI_VECTORSTORE_ELASTICSEARCH_INDEX_NAME=docs esvector --format properties
//! ```

mod output;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use esvector_config::{ConfigError, PROPERTIES_PREFIX, VectorStoreConfig};
pub use output::{OutputFormat, Report};

use crate::TRACING_TARGET_CONFIG;

/// Environment variable naming the configuration file when `--config` is
/// not given.
pub const CONFIG_FILE_VAR: &str = "ESVECTOR_CONFIG_FILE";

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "esvector")]
#[command(about = "Load, validate and print Elasticsearch vector store settings")]
#[command(version)]
pub struct Cli {
    /// JSON configuration document bound under the vector store prefix
    /// [env: ESVECTOR_CONFIG_FILE].
    #[arg(short = 'c', long = "config")]
    pub config_file: Option<PathBuf>,

    /// Output format for the effective settings.
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Print the merged settings as supplied, without defaults or validation.
    #[arg(long)]
    pub raw: bool,

    /// Vector store settings from flags.
    #[clap(flatten)]
    pub store: VectorStoreConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file has to be loaded first so [`Cli::report`] can see the
    /// values it defines.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Builds the effective configuration from the file, the environment
    /// variables in `vars` and the flags, in increasing precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or bound,
    /// or an environment variable cannot be coerced.
    pub fn load_with_env<I, K, V>(&self, vars: I) -> anyhow::Result<VectorStoreConfig>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let vars: Vec<(String, String)> = vars
            .into_iter()
            .map(|(name, value)| (name.as_ref().to_owned(), value.as_ref().to_owned()))
            .collect();

        let env_file = vars
            .iter()
            .find(|(name, value)| name == CONFIG_FILE_VAR && !value.is_empty())
            .map(|(_, value)| PathBuf::from(value));
        let env = VectorStoreConfig::bind_env(vars.iter().map(|(name, value)| (name, value)))
            .context("failed to bind environment variables")?;

        let base = match self.config_file.as_deref().or(env_file.as_deref()) {
            Some(path) => load_file(path)?,
            None => VectorStoreConfig::default(),
        };

        Ok(base.merge(env).merge(self.store.clone()))
    }

    /// Produces the report selected by `--raw` from the process environment.
    ///
    /// Variables that are not valid unicode are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or, unless `--raw` is set, the
    /// settings do not resolve.
    pub fn report(&self) -> anyhow::Result<Report> {
        let vars = std::env::vars_os().filter_map(|(name, value)| {
            Some((name.into_string().ok()?, value.into_string().ok()?))
        });
        self.report_with_env(vars)
    }

    /// Same as [`Cli::report`], reading environment variables from `vars`.
    ///
    /// # Errors
    ///
    /// See [`Cli::report`].
    pub fn report_with_env<I, K, V>(&self, vars: I) -> anyhow::Result<Report>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.build_report(self.load_with_env(vars))
    }

    fn build_report(&self, loaded: anyhow::Result<VectorStoreConfig>) -> anyhow::Result<Report> {
        let config = loaded.context("failed to load vector store configuration")?;

        if self.raw {
            return Ok(Report::Raw(config));
        }

        let options = config
            .resolve()
            .context("invalid vector store configuration")?;

        if options.similarity.requires_normalized_vectors() {
            tracing::info!(
                target: TRACING_TARGET_CONFIG,
                similarity = %options.similarity,
                "similarity expects unit-length vectors, normalize embeddings before indexing"
            );
        }

        Ok(Report::Resolved(options))
    }

    /// Logs configuration sources at info level and flag values at debug level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            config_file = ?self.config_file,
            format = ?self.format,
            raw = self.raw,
            "configuration sources"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            index_name = ?self.store.index_name(),
            dimensions = ?self.store.dimensions(),
            dense_vector_indexing = ?self.store.is_dense_vector_indexing(),
            similarity = ?self.store.similarity(),
            "vector store flags"
        );
    }
}

/// Classifies a failure as `binding` (a source could not be read into the
/// record), `validation` (the record did not resolve) or `other`.
pub fn failure_kind(error: &anyhow::Error) -> &'static str {
    match error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ConfigError>())
    {
        Some(err) if err.is_binding_error() => "binding",
        Some(_) => "validation",
        None => "other",
    }
}

fn load_file(path: &Path) -> anyhow::Result<VectorStoreConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration file {}", path.display()))?;

    let config = VectorStoreConfig::from_json_str(&contents, PROPERTIES_PREFIX)
        .with_context(|| format!("failed to bind configuration file {}", path.display()))?;

    tracing::debug!(
        target: TRACING_TARGET_CONFIG,
        path = %path.display(),
        "loaded configuration file"
    );

    Ok(config)
}
