//! Read-only query surface the resolver consumes.
//!
//! The resolver never touches a concrete model type; it asks a
//! [`DesignAccessor`] for instances, components, connections and active
//! views. [`DesignSnapshot`] is the in-crate implementation.

use super::component::{Component, DependencyDirection};
use super::design::{Connection, DesignSnapshot, Endpoint, Instance};
use crate::base::{ComponentId, InstanceId};

/// Read-only queries over one design.
///
/// Implementations must be immutable for the duration of a resolution pass.
pub trait DesignAccessor {
    /// All instances, in stored order.
    fn instances(&self) -> &[Instance];

    /// All API connections, in stored order.
    fn connections(&self) -> &[Connection];

    fn component(&self, id: ComponentId) -> Option<&Component>;

    fn find_instance(&self, name: &str) -> Option<InstanceId>;

    /// Name of the view the design configuration selects for an instance.
    fn active_view(&self, instance: &str) -> Option<&str>;

    /// Name of the system view the design is elaborated under.
    fn system_view(&self) -> &str;

    /// Component owning the design.
    fn top_component(&self) -> Option<&Component>;

    fn instance(&self, id: InstanceId) -> Option<&Instance> {
        self.instances().get(id.index())
    }

    /// Component of an instance.
    fn instance_component(&self, id: InstanceId) -> Option<&Component> {
        self.instance(id).and_then(|i| self.component(i.component))
    }

    /// Dependency direction of the interface behind an endpoint.
    fn direction(&self, endpoint: &Endpoint) -> Option<DependencyDirection> {
        self.instance_component(endpoint.instance)?
            .interface(&endpoint.interface)
            .map(|i| i.direction)
    }
}

impl DesignAccessor for DesignSnapshot {
    fn instances(&self) -> &[Instance] {
        &self.design().instances
    }

    fn connections(&self) -> &[Connection] {
        &self.design().connections
    }

    fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components().get(id.index())
    }

    fn find_instance(&self, name: &str) -> Option<InstanceId> {
        self.lookup(name)
    }

    fn active_view(&self, instance: &str) -> Option<&str> {
        self.design().active_views.get(instance).map(|v| v.as_ref())
    }

    fn system_view(&self) -> &str {
        &self.design().system_view
    }

    fn top_component(&self) -> Option<&Component> {
        self.design()
            .top_component
            .and_then(|id| self.component(id))
    }
}
