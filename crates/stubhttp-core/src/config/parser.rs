//! Procedure file parsing (YAML/JSON/JSONC).

use crate::config::error::ConfigError;
use crate::config::procedure::ProcedureConfig;
use crate::types::procedure::Procedure;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Serialization format of a procedure file, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureFormat {
    Yaml,
    Json,
    /// JSON with `//` and `/* */` comments
    Jsonc,
}

impl ProcedureFormat {
    /// `None` unless the extension is `yaml`, `yml`, `json` or `jsonc` (any case).
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "jsonc" => Some(Self::Jsonc),
            _ => None,
        }
    }

    /// Deserialize the whole file content.
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T, ConfigError> {
        let parsed = match self {
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
            Self::Jsonc => serde_json::from_str(&strip_json_comments(content))?,
        };
        Ok(parsed)
    }
}

/// Strip `//` and `/* */` comments outside of string literals.
pub fn strip_json_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                // Drop up to the line break, keep the break itself
                for next in chars.by_ref() {
                    if next == '\n' || next == '\r' {
                        result.push(next);
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => result.push(c),
        }
    }

    result
}

/// Parse a procedure file, choosing the format from `path`.
pub fn parse_config<T: DeserializeOwned>(content: &str, path: &str) -> Result<T, ConfigError> {
    ProcedureFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnknownFileType(path.to_string()))?
        .parse(content)
}

/// Load procedures from every file matching a glob pattern.
///
/// Files are read in sorted path order and their procedure lists concatenated,
/// so registration order (and with it duplicate resolution) is deterministic.
pub async fn load_procedures(pattern: &str) -> Result<Vec<Procedure>, ConfigError> {
    let mut paths = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
    paths.sort();

    if paths.is_empty() {
        tracing::warn!(pattern, "No procedure files matched");
    }

    let mut procedures = Vec::new();
    for path in paths {
        let path = path.to_string_lossy().into_owned();
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;

        let entries: Vec<ProcedureConfig> = parse_config(&content, &path)?;
        tracing::debug!(path = %path, procedures = entries.len(), "Loaded procedure file");
        procedures.extend(entries.into_iter().map(Procedure::from));
    }

    Ok(procedures)
}
