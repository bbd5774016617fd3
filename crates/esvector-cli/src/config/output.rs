//! Rendering of the effective settings.

use clap::ValueEnum;
use esvector_config::{PROPERTIES_PREFIX, VectorStoreConfig, VectorStoreOptions};

/// Output format for the effective settings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON object.
    #[default]
    Json,
    /// One `prefix.key=value` line per setting.
    Properties,
}

/// Settings to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// The merged record exactly as supplied.
    Raw(VectorStoreConfig),
    /// The validated record with defaults applied.
    Resolved(VectorStoreOptions),
}

impl Report {
    /// Renders the report in `format`.
    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        match format {
            OutputFormat::Json => self.render_json(),
            OutputFormat::Properties => Ok(self.render_properties()),
        }
    }

    fn render_json(&self) -> anyhow::Result<String> {
        let json = match self {
            Self::Raw(config) => serde_json::to_string_pretty(config)?,
            Self::Resolved(options) => serde_json::to_string_pretty(options)?,
        };
        Ok(json)
    }

    fn render_properties(&self) -> String {
        let entries = match self {
            Self::Raw(config) => config.entries(PROPERTIES_PREFIX),
            Self::Resolved(options) => vec![
                qualified("index-name", options.index_name.clone()),
                qualified("dimensions", options.dimensions.to_string()),
                qualified(
                    "dense-vector-indexing",
                    options.dense_vector_indexing.to_string(),
                ),
                qualified("similarity", options.similarity.to_string()),
            ],
        };

        entries
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn qualified(key: &str, value: String) -> (String, String) {
    (format!("{PROPERTIES_PREFIX}.{key}"), value)
}
