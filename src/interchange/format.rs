//! Document formats and their serde codecs.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::InterchangeError;

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Human-readable name of the format.
    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }

    /// File extensions for this format.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Yaml => &["yaml", "yml"],
        }
    }

    /// Format for a file extension, case-insensitively.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.to_ascii_lowercase();
        [Self::Json, Self::Yaml]
            .into_iter()
            .find(|format| format.extensions().contains(&extension.as_str()))
    }

    /// Format of a path, detected from its extension.
    pub fn from_path(path: &Path) -> Result<Self, InterchangeError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| InterchangeError::unsupported(path.display().to_string()))
    }

    /// Decode a value from bytes.
    pub fn decode<T: DeserializeOwned>(self, input: &[u8]) -> Result<T, InterchangeError> {
        match self {
            Self::Json => {
                serde_json::from_slice(input).map_err(|e| InterchangeError::json(e.to_string()))
            }
            Self::Yaml => {
                serde_yaml::from_slice(input).map_err(|e| InterchangeError::yaml(e.to_string()))
            }
        }
    }

    /// Encode a value to bytes.
    pub fn encode<T: Serialize>(self, value: &T) -> Result<Vec<u8>, InterchangeError> {
        match self {
            Self::Json => serde_json::to_vec_pretty(value)
                .map_err(|e| InterchangeError::json(e.to_string())),
            Self::Yaml => serde_yaml::to_string(value)
                .map(String::into_bytes)
                .map_err(|e| InterchangeError::yaml(e.to_string())),
        }
    }
}
