//! Error types for procedure file loading.

use thiserror::Error;

/// Failure to find, read or deserialize procedure files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid JSON procedure file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid YAML procedure file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Extension is not yaml, yml, json or jsonc
    #[error("Unsupported procedure file extension: '{0}'")]
    UnknownFileType(String),
    #[error("Failed to read procedure file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid procedure file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("Failed to list procedure files: {0}")]
    Glob(#[from] glob::GlobError),
}
