//! Design-level model: instances, API connections, active views.
//!
//! A [`DesignSnapshot`] is the immutable arena a resolution pass reads from.
//! Instances and components are addressed by [`InstanceId`] and
//! [`ComponentId`]; connection endpoints are resolved to ids when the
//! snapshot is built, so the resolver never chases names it cannot find.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

#[cfg(feature = "interchange")]
use serde::{Deserialize, Serialize};

use super::component::Component;
use super::error::ModelError;
use crate::base::{ComponentId, InstanceId, Name};

// ============================================================================
// INSTANCES AND CONNECTIONS
// ============================================================================

/// Whether an instance is a hardware host or a piece of software.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "lowercase"))]
pub enum InstanceKind {
    Hardware,
    Software,
}

/// A named occurrence of a component inside the design.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    pub name: Name,
    pub kind: InstanceKind,
    pub component: ComponentId,
    /// Name of the instance this one is hosted on.
    pub mapping: Option<Name>,
}

impl Instance {
    pub fn is_hardware(&self) -> bool {
        self.kind == InstanceKind::Hardware
    }

    pub fn is_software(&self) -> bool {
        self.kind == InstanceKind::Software
    }
}

/// One side of an API connection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub instance: InstanceId,
    pub interface: Name,
}

/// An API connection: two endpoints for a direct link, more for an n-ary one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub endpoints: Vec<Endpoint>,
}

impl Connection {
    /// True if any endpoint belongs to the instance.
    pub fn touches(&self, instance: InstanceId) -> bool {
        self.endpoints.iter().any(|e| e.instance == instance)
    }
}

/// The design: instances, their connections, and the active view of each
/// instance as chosen by the design configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Design {
    pub name: Name,
    /// System view the design is elaborated under.
    pub system_view: Name,
    /// Component that owns the design; holds per-instance header sets.
    pub top_component: Option<ComponentId>,
    pub instances: Vec<Instance>,
    pub connections: Vec<Connection>,
    /// Instance name → active view name.
    pub active_views: IndexMap<Name, Name>,
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Validated, immutable design plus the components it instantiates.
#[derive(Clone, Debug)]
pub struct DesignSnapshot {
    components: Vec<Component>,
    design: Design,
    by_name: FxHashMap<Name, InstanceId>,
}

impl DesignSnapshot {
    /// Validate references and index the design.
    pub fn new(components: Vec<Component>, design: Design) -> Result<Self, ModelError> {
        let in_range = |id: ComponentId| id.index() < components.len();

        if let Some(top) = design.top_component.filter(|top| !in_range(*top)) {
            return Err(ModelError::unknown_component(top.to_string()));
        }

        let mut by_name = FxHashMap::default();
        for (index, instance) in design.instances.iter().enumerate() {
            if !in_range(instance.component) {
                return Err(ModelError::unknown_component(instance.component.to_string()));
            }
            if by_name
                .insert(instance.name.clone(), InstanceId::new(index))
                .is_some()
            {
                return Err(ModelError::DuplicateInstance(instance.name.to_string()));
            }
        }

        for (index, connection) in design.connections.iter().enumerate() {
            if connection.endpoints.len() < 2 {
                return Err(ModelError::DegenerateConnection(index));
            }
            for endpoint in &connection.endpoints {
                let instance = design
                    .instances
                    .get(endpoint.instance.index())
                    .ok_or_else(|| ModelError::unknown_endpoint(endpoint.instance.to_string()))?;
                let component = &components[instance.component.index()];
                if component.interface(&endpoint.interface).is_none() {
                    return Err(ModelError::unknown_interface(
                        instance.name.as_ref(),
                        endpoint.interface.as_ref(),
                    ));
                }
            }
        }

        Ok(Self {
            components,
            design,
            by_name,
        })
    }

    pub fn design(&self) -> &Design {
        &self.design
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<InstanceId> {
        self.by_name.get(name).copied()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

#[derive(Clone, Debug)]
struct PendingInstance {
    name: Name,
    kind: InstanceKind,
    component: Name,
    mapping: Option<Name>,
}

/// Name-based construction of a [`DesignSnapshot`].
///
/// Components are registered by name and instances, connections and the top
/// component refer to them by name. [`DesignBuilder::build`] resolves every
/// name and validates the result.
#[derive(Clone, Debug)]
pub struct DesignBuilder {
    name: Name,
    system_view: Name,
    components: Vec<Component>,
    top_component: Option<Name>,
    instances: Vec<PendingInstance>,
    connections: Vec<Vec<(Name, Name)>>,
    active_views: IndexMap<Name, Name>,
}

impl DesignBuilder {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            system_view: Name::from(""),
            components: Vec::new(),
            top_component: None,
            instances: Vec::new(),
            connections: Vec::new(),
            active_views: IndexMap::new(),
        }
    }

    pub fn system_view(&mut self, name: impl Into<Name>) -> &mut Self {
        self.system_view = name.into();
        self
    }

    /// Register a component, replacing any earlier one of the same name.
    pub fn component(&mut self, component: Component) -> &mut Self {
        match self
            .components
            .iter_mut()
            .find(|c| c.name == component.name)
        {
            Some(existing) => *existing = component,
            None => self.components.push(component),
        }
        self
    }

    pub fn component_mut(&mut self, name: &str) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.name.as_ref() == name)
    }

    pub fn top_component(&mut self, name: impl Into<Name>) -> &mut Self {
        self.top_component = Some(name.into());
        self
    }

    /// Add a hardware instance and select its active view.
    pub fn hardware(
        &mut self,
        instance: impl Into<Name>,
        component: impl Into<Name>,
        view: impl Into<Name>,
    ) -> &mut Self {
        let instance = instance.into();
        self.active_view(instance.clone(), view);
        self.instance(instance, InstanceKind::Hardware, component, None)
    }

    /// Add a software instance hosted on `mapping` and select its active view.
    pub fn software(
        &mut self,
        instance: impl Into<Name>,
        component: impl Into<Name>,
        mapping: Option<&str>,
        view: impl Into<Name>,
    ) -> &mut Self {
        let instance = instance.into();
        self.active_view(instance.clone(), view);
        self.instance(instance, InstanceKind::Software, component, mapping)
    }

    /// Add an instance without touching the active view configuration.
    pub fn instance(
        &mut self,
        name: impl Into<Name>,
        kind: InstanceKind,
        component: impl Into<Name>,
        mapping: Option<&str>,
    ) -> &mut Self {
        self.instances.push(PendingInstance {
            name: name.into(),
            kind,
            component: component.into(),
            mapping: mapping.filter(|m| !m.is_empty()).map(Name::from),
        });
        self
    }

    pub fn active_view(&mut self, instance: impl Into<Name>, view: impl Into<Name>) -> &mut Self {
        self.active_views.insert(instance.into(), view.into());
        self
    }

    /// Connect two `(instance, interface)` endpoints.
    pub fn connect(
        &mut self,
        instance_a: &str,
        interface_a: &str,
        instance_b: &str,
        interface_b: &str,
    ) -> &mut Self {
        self.connect_all(&[(instance_a, interface_a), (instance_b, interface_b)])
    }

    /// Add an n-ary connection over the listed endpoints.
    pub fn connect_all(&mut self, endpoints: &[(&str, &str)]) -> &mut Self {
        self.connections.push(
            endpoints
                .iter()
                .map(|(i, a)| (Name::from(*i), Name::from(*a)))
                .collect(),
        );
        self
    }

    /// Resolve names and validate the design.
    pub fn build(&self) -> Result<DesignSnapshot, ModelError> {
        let component_id = |name: &str| {
            self.components
                .iter()
                .position(|c| c.name.as_ref() == name)
                .map(ComponentId::new)
                .ok_or_else(|| ModelError::unknown_component(name))
        };

        let top_component = self
            .top_component
            .as_deref()
            .map(|name| component_id(name))
            .transpose()?;

        let instances = self
            .instances
            .iter()
            .map(|pending| {
                Ok(Instance {
                    name: pending.name.clone(),
                    kind: pending.kind,
                    component: component_id(&pending.component)?,
                    mapping: pending.mapping.clone(),
                })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        let instance_id = |name: &str| {
            instances
                .iter()
                .position(|i| i.name.as_ref() == name)
                .map(InstanceId::new)
                .ok_or_else(|| ModelError::unknown_endpoint(name))
        };

        let connections = self
            .connections
            .iter()
            .map(|endpoints| {
                let endpoints = endpoints
                    .iter()
                    .map(|(instance, interface)| {
                        Ok(Endpoint {
                            instance: instance_id(instance)?,
                            interface: interface.clone(),
                        })
                    })
                    .collect::<Result<Vec<_>, ModelError>>()?;
                Ok(Connection { endpoints })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        let design = Design {
            name: self.name.clone(),
            system_view: self.system_view.clone(),
            top_component,
            instances,
            connections,
            active_views: self.active_views.clone(),
        };

        DesignSnapshot::new(self.components.clone(), design)
    }
}
