//! Serialized design documents.
//!
//! A [`DesignDocument`] names everything by string: instances reference
//! their component and hardware host by name, and connection endpoints are
//! written as `"instance.interface"`. Loading resolves the names through
//! [`DesignBuilder`], so a document with dangling references fails with
//! [`InterchangeError::Model`] before any resolution starts.
//!
//! An endpoint is split at its last `.`, so instance names may contain dots
//! but interface names may not; such interfaces are rejected with
//! [`InterchangeError::DottedInterface`] on both read and write.
//!
//! ```yaml
//! name: demo
//! system_view: sysview
//! components:
//!   - name: hw
//!     views: [{ name: firmware, instantiation: firmware_inst }]
//!     instantiations:
//!       - name: firmware_inst
//!         default_builders: [{ file_type: cSource, command: gcc, flags: -hw }]
//! instances:
//!   - { name: cpu_0, kind: hardware, component: hw, view: firmware }
//!   - { name: app_0, kind: software, component: app, mapping: cpu_0, view: default }
//! connections:
//!   - [app_0.api, lib_0.svc]
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::InterchangeError;
use super::format::DocumentFormat;
use crate::config::ResolverConfig;
use crate::model::{Component, DesignBuilder, DesignSnapshot, InstanceKind};

/// One instance of a design document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceEntry {
    pub name: String,
    pub kind: InstanceKind,
    pub component: String,
    /// Name of the hosting hardware instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<String>,
    /// Active view; may also be given in `active_views`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
}

/// Name-based, serializable form of a design snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignDocument {
    pub name: String,
    pub system_view: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_component: Option<String>,
    pub components: Vec<Component>,
    pub instances: Vec<InstanceEntry>,
    /// Each connection lists its `"instance.interface"` endpoints.
    pub connections: Vec<Vec<String>>,
    /// Instance name → active view. Overrides `InstanceEntry::view`.
    pub active_views: IndexMap<String, String>,
}

fn parse_endpoint(text: &str) -> Result<(&str, &str), InterchangeError> {
    text.rsplit_once('.')
        .filter(|(instance, interface)| !instance.is_empty() && !interface.is_empty())
        .ok_or_else(|| InterchangeError::InvalidEndpoint(text.to_string()))
}

fn check_interface_names(components: &[Component]) -> Result<(), InterchangeError> {
    for component in components {
        if let Some(interface) = component.interfaces.iter().find(|i| i.name.contains('.')) {
            return Err(InterchangeError::DottedInterface {
                component: component.name.to_string(),
                interface: interface.name.to_string(),
            });
        }
    }
    Ok(())
}

impl DesignDocument {
    /// Resolve names and validate the design.
    pub fn to_snapshot(&self) -> Result<DesignSnapshot, InterchangeError> {
        check_interface_names(&self.components)?;
        let mut builder = DesignBuilder::new(self.name.as_str());
        builder.system_view(self.system_view.as_str());
        for component in &self.components {
            builder.component(component.clone());
        }
        if let Some(top) = &self.top_component {
            builder.top_component(top.as_str());
        }

        for entry in &self.instances {
            builder.instance(
                entry.name.as_str(),
                entry.kind,
                entry.component.as_str(),
                entry.mapping.as_deref(),
            );
            if let Some(view) = &entry.view {
                builder.active_view(entry.name.as_str(), view.as_str());
            }
        }
        for (instance, view) in &self.active_views {
            builder.active_view(instance.as_str(), view.as_str());
        }

        for connection in &self.connections {
            let endpoints = connection
                .iter()
                .map(|endpoint| parse_endpoint(endpoint))
                .collect::<Result<Vec<_>, _>>()?;
            builder.connect_all(&endpoints);
        }

        Ok(builder.build()?)
    }

    /// Name-based form of a snapshot.
    pub fn from_snapshot(snapshot: &DesignSnapshot) -> Self {
        let design = snapshot.design();
        let component_name = |index: usize| {
            snapshot
                .components()
                .get(index)
                .map(|c| c.name.to_string())
                .unwrap_or_default()
        };
        let instance_name = |index: usize| {
            design
                .instances
                .get(index)
                .map(|i| i.name.to_string())
                .unwrap_or_default()
        };

        Self {
            name: design.name.to_string(),
            system_view: design.system_view.to_string(),
            top_component: design.top_component.map(|id| component_name(id.index())),
            components: snapshot.components().to_vec(),
            instances: design
                .instances
                .iter()
                .map(|instance| InstanceEntry {
                    name: instance.name.to_string(),
                    kind: instance.kind,
                    component: component_name(instance.component.index()),
                    mapping: instance.mapping.as_deref().map(str::to_string),
                    view: None,
                })
                .collect(),
            connections: design
                .connections
                .iter()
                .map(|connection| {
                    connection
                        .endpoints
                        .iter()
                        .map(|e| format!("{}.{}", instance_name(e.instance.index()), e.interface))
                        .collect()
                })
                .collect(),
            active_views: design
                .active_views
                .iter()
                .map(|(instance, view)| (instance.to_string(), view.to_string()))
                .collect(),
        }
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Read a design from bytes.
pub fn read_design(input: &[u8], format: DocumentFormat) -> Result<DesignSnapshot, InterchangeError> {
    let document: DesignDocument = format.decode(input)?;
    tracing::debug!(
        "[INTERCHANGE] read {} design '{}': {} component(s), {} instance(s)",
        format.name(),
        document.name,
        document.components.len(),
        document.instances.len()
    );
    document.to_snapshot()
}

/// Load a design file; the format is taken from the extension.
pub fn load_design(path: impl AsRef<Path>) -> Result<DesignSnapshot, InterchangeError> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;
    let input = std::fs::read(path)?;
    read_design(&input, format)
}

/// Write a design to bytes.
pub fn write_design(
    snapshot: &DesignSnapshot,
    format: DocumentFormat,
) -> Result<Vec<u8>, InterchangeError> {
    check_interface_names(snapshot.components())?;
    format.encode(&DesignDocument::from_snapshot(snapshot))
}

/// Read a resolver configuration from bytes. Missing fields keep their defaults.
pub fn read_config(input: &[u8], format: DocumentFormat) -> Result<ResolverConfig, InterchangeError> {
    format.decode(input)
}

/// Load a resolver configuration file; the format is taken from the extension.
pub fn load_config(path: impl AsRef<Path>) -> Result<ResolverConfig, InterchangeError> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;
    let input = std::fs::read(path)?;
    read_config(&input, format)
}
