//! Stack discovery: top-of-stack detection and the requester→provider walk.
//!
//! The walk is an explicit depth-first worklist with a visited set owned by
//! one call. Providers of an instance are pushed in reverse connection order,
//! so parts come out in the same preorder a recursive walk over the stored
//! connection order would produce. The hardware host is marked visited
//! before the walk starts and is appended last.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;

use super::resolver::StackResolver;
use super::types::{Stack, StackPart};
use crate::base::{InstanceId, Name};
use crate::config::SoftwareBuilderPolicy;
use crate::diagnostics::DiagnosticCollector;
use crate::model::{Builder, DependencyDirection, DesignAccessor, Instance};

// ============================================================================
// PREDICATES
// ============================================================================

/// True unless the instance provides a service through some connection.
///
/// An instance that takes part in no connection is a top of stack.
pub fn is_top_of_stack<D>(design: &D, instance: InstanceId) -> bool
where
    D: DesignAccessor + ?Sized,
{
    !design.connections().iter().any(|connection| {
        connection.endpoints.iter().any(|endpoint| {
            endpoint.instance == instance
                && design.direction(endpoint) == Some(DependencyDirection::Provider)
        })
    })
}

/// Instances `current` consumes, in connection then endpoint order.
///
/// An edge exists when the current side of a connection is a requester and
/// the other side is a provider. Both directions are checked per hop.
pub fn providers_of<D>(design: &D, current: InstanceId) -> Vec<InstanceId>
where
    D: DesignAccessor + ?Sized,
{
    let mut providers = Vec::new();
    for connection in design.connections() {
        for (own_index, own) in connection.endpoints.iter().enumerate() {
            if own.instance != current
                || design.direction(own) != Some(DependencyDirection::Requester)
            {
                continue;
            }
            providers.extend(
                connection
                    .endpoints
                    .iter()
                    .enumerate()
                    .filter(|(index, other)| {
                        *index != own_index
                            && design.direction(other) == Some(DependencyDirection::Provider)
                    })
                    .map(|(_, other)| other.instance),
            );
        }
    }
    providers
}

fn push_flags(view_flags: &mut IndexSet<Name>, flags: &str) {
    let flags = flags.trim();
    if !flags.is_empty() {
        view_flags.insert(Name::from(flags));
    }
}

// ============================================================================
// WALK
// ============================================================================

/// Resolved hardware host of a stack.
struct HardwareHost {
    part: StackPart,
    builder: Builder,
}

impl<'a, D> StackResolver<'a, D>
where
    D: DesignAccessor + ?Sized,
{
    /// Discover the parts of the stack rooted at `root`.
    ///
    /// Returns `None` when the stack is abandoned; the reason is pushed to
    /// `diagnostics`. The returned stack has no objects yet.
    pub fn resolve_stack(
        &self,
        root: InstanceId,
        diagnostics: &mut DiagnosticCollector,
    ) -> Option<Stack> {
        let root_instance = self.design.instance(root)?;
        let root_name = root_instance.name.clone();
        let hardware = self.resolve_hardware(root_instance, diagnostics)?;
        let reference_file_type = hardware.builder.file_type.clone();

        let mut view_flags = IndexSet::new();
        push_flags(&mut view_flags, &hardware.builder.flags);

        let mut visited = FxHashSet::default();
        visited.insert(hardware.part.instance_id);
        let mut worklist = vec![root];
        let mut parts: Vec<StackPart> = Vec::new();

        while let Some(current) = worklist.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(instance) = self.design.instance(current) else {
                continue;
            };
            if !instance.is_software() {
                tracing::trace!("[STACK] {}: skipping hardware '{}'", root_name, instance.name);
                continue;
            }
            let Some(part) = self.software_part(
                &root_name,
                current,
                instance,
                &reference_file_type,
                diagnostics,
            ) else {
                continue;
            };

            push_flags(&mut view_flags, part.own_flags());
            tracing::trace!("[STACK] {}: + '{}'", root_name, part.instance);
            parts.push(part);

            let providers = providers_of(self.design, current);
            worklist.extend(providers.into_iter().rev());
        }

        let Some(first) = parts.first() else {
            diagnostics.empty_stack(&root_name);
            return None;
        };
        let name = first.instance.clone();
        parts.push(hardware.part);

        Some(Stack {
            name,
            parts,
            objects: Vec::new(),
            view_flags,
            reference_file_type,
            hardware_builder: hardware.builder,
            global_flags: Name::from(self.config.global_flags.as_str()),
            conflicts: Vec::new(),
        })
    }

    fn resolve_hardware(
        &self,
        root: &Instance,
        diagnostics: &mut DiagnosticCollector,
    ) -> Option<HardwareHost> {
        let Some(mapping) = root.mapping.as_deref() else {
            diagnostics.no_hardware_mapping(&root.name);
            return None;
        };

        let resolved = self
            .design
            .find_instance(mapping)
            .filter(|id| self.design.instance(*id).is_some_and(|i| i.is_hardware()))
            .and_then(|id| {
                let view = self.design.active_view(mapping)?;
                let component = self.design.instance_component(id)?;
                let instantiation = component.instantiation_of_view(view)?;
                Some((id, view, instantiation))
            });
        let Some((id, view, instantiation)) = resolved else {
            diagnostics.unresolved_hardware(&root.name, mapping);
            return None;
        };

        let builder = match self.config.reference_file_type.as_deref() {
            Some(file_type) => instantiation.builder_for_type(file_type),
            None => instantiation.default_builders.first(),
        }
        .filter(|b| b.has_command());
        let Some(builder) = builder.cloned() else {
            diagnostics.no_hardware_builder(&root.name, mapping);
            return None;
        };

        let instance = self.design.instance(id)?;
        tracing::trace!(
            "[STACK] {}: hosted on '{}' ({} for '{}')",
            root.name,
            mapping,
            builder.command,
            builder.file_type
        );

        let part = StackPart {
            instance: instance.name.clone(),
            instance_id: id,
            component: instance.component,
            view: Name::from(view),
            instantiation: instantiation.name.clone(),
            builder: Some(builder.clone()),
            header_set: self.header_sets.get_or_create(self.design, mapping),
            is_hardware: true,
        };
        Some(HardwareHost { part, builder })
    }

    fn software_part(
        &self,
        root: &str,
        id: InstanceId,
        instance: &Instance,
        reference_file_type: &str,
        diagnostics: &mut DiagnosticCollector,
    ) -> Option<StackPart> {
        let name = instance.name.as_ref();
        let Some(view) = self.design.active_view(name) else {
            diagnostics.missing_view(root, name, None);
            return None;
        };
        let Some((component, view_def)) = self
            .design
            .component(instance.component)
            .and_then(|component| component.find_view(view).map(|v| (component, v)))
        else {
            diagnostics.missing_view(root, name, Some(view));
            return None;
        };

        let Some(instantiation) = view_def
            .instantiation
            .as_deref()
            .and_then(|reference| component.find_instantiation(reference))
        else {
            diagnostics.missing_instantiation(root, name, view);
            return None;
        };

        let builder = instantiation.builder_for_type(reference_file_type).cloned();
        if builder.is_none() {
            match self.config.software_builder {
                SoftwareBuilderPolicy::Require => {
                    diagnostics.missing_builder(root, name, reference_file_type);
                    return None;
                }
                SoftwareBuilderPolicy::FallBackToHardware => {
                    tracing::trace!("[STACK] {}: '{}' falls back to the hardware builder", root, name);
                }
            }
        }

        Some(StackPart {
            instance: instance.name.clone(),
            instance_id: id,
            component: instance.component,
            view: Name::from(view),
            instantiation: instantiation.name.clone(),
            builder,
            header_set: self.header_sets.get_or_create(self.design, name),
            is_hardware: false,
        })
    }
}
