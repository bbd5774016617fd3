//! String to scalar coercion.

use crate::error::{ConfigError, ConfigResult};

/// Parses a signed 32-bit integer. Blank input is treated as unset.
pub(crate) fn parse_integer(key: &str, value: &str) -> ConfigResult<Option<i32>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| ConfigError::invalid_value(key, value, "a 32-bit integer"))
}

/// Parses a boolean from `true/false`, `yes/no`, `on/off` or `1/0`,
/// ignoring ASCII case. Blank input is treated as unset.
pub(crate) fn parse_boolean(key: &str, value: &str) -> ConfigResult<Option<bool>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(Some(true)),
        "false" | "no" | "off" | "0" => Ok(Some(false)),
        _ => Err(ConfigError::invalid_value(key, value, "a boolean")),
    }
}

/// Clap value parser for `--dimensions`, with the same rules as binding.
#[cfg(feature = "config")]
pub(crate) fn dimensions_flag(value: &str) -> ConfigResult<i32> {
    parse_integer("--dimensions", value)?
        .ok_or_else(|| ConfigError::invalid_value("--dimensions", value, "a 32-bit integer"))
}

/// Clap value parser for `--dense-vector-indexing`, with the same rules as
/// binding.
#[cfg(feature = "config")]
pub(crate) fn dense_vector_indexing_flag(value: &str) -> ConfigResult<bool> {
    parse_boolean("--dense-vector-indexing", value)?.ok_or_else(|| {
        ConfigError::invalid_value("--dense-vector-indexing", value, "a boolean")
    })
}
