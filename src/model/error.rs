//! Error types for design snapshot construction.

use thiserror::Error;

/// Dangling or inconsistent references found while building a snapshot.
///
/// These are rejected before resolution starts; the resolver itself never
/// fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// An instance or the design references a component that does not exist.
    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    /// Two instances share a name.
    #[error("Duplicate instance name: {0}")]
    DuplicateInstance(String),

    /// A reference names an instance that does not exist.
    #[error("Unknown instance '{name}' referenced by {context}")]
    UnknownInstance { context: &'static str, name: String },

    /// A connection endpoint names an interface its component lacks.
    #[error("Instance '{instance}' has no API interface '{interface}'")]
    UnknownInterface { instance: String, interface: String },

    /// A connection with fewer than two endpoints.
    #[error("Connection #{0} has fewer than two endpoints")]
    DegenerateConnection(usize),
}

impl ModelError {
    /// Create an unknown-component error.
    pub fn unknown_component(name: impl Into<String>) -> Self {
        Self::UnknownComponent(name.into())
    }

    /// Create an unknown-instance error for a connection endpoint.
    pub fn unknown_endpoint(name: impl Into<String>) -> Self {
        Self::UnknownInstance {
            context: "connection endpoint",
            name: name.into(),
        }
    }

    /// Create an unknown-interface error.
    pub fn unknown_interface(instance: impl Into<String>, interface: impl Into<String>) -> Self {
        Self::UnknownInterface {
            instance: instance.into(),
            interface: interface.into(),
        }
    }
}
