//! Error types for design and configuration documents.

use thiserror::Error;

use crate::model::ModelError;

/// Errors that can occur while loading or writing a document.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML parsing or serialization error.
    #[error("YAML error: {0}")]
    Yaml(String),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File extension does not name a known document format.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Connection endpoint not written as `instance.interface`.
    #[error("Invalid endpoint '{0}': expected 'instance.interface'")]
    InvalidEndpoint(String),

    /// Interface name that cannot be written in an endpoint.
    #[error("Interface '{interface}' of component '{component}' contains '.'")]
    DottedInterface { component: String, interface: String },

    /// The document describes an inconsistent design.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl InterchangeError {
    /// Create a JSON error.
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }

    /// Create a YAML error.
    pub fn yaml(message: impl Into<String>) -> Self {
        Self::Yaml(message.into())
    }

    /// Create an unsupported-format error.
    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::UnsupportedFormat(what.into())
    }
}
