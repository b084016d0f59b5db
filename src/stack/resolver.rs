//! Stack resolver, the entry point of a resolution pass.
//!
//! ```text
//! roots (top-of-stack software instances, design order)
//!   │
//!   ├─► resolve_stack     parts + view flags      (discover.rs)
//!   ├─► resolve_objects   one record per file     (objects.rs)
//!   └─► find_conflicts    same-identity clashes   (conflicts.rs)
//!   │
//!   ▼
//! StackRegistry { stacks, diagnostics }
//! ```
//!
//! Roots are independent: each walk owns its visited set, and the only
//! shared state is the header set registry. With `parallel` enabled the
//! roots are resolved on the rayon pool and merged back in root order.

use rayon::prelude::*;

use super::conflicts::find_conflicts;
use super::discover::is_top_of_stack;
use super::types::{Stack, StackRegistry};
use crate::base::InstanceId;
use crate::config::ResolverConfig;
use crate::diagnostics::DiagnosticCollector;
use crate::model::{DesignAccessor, HeaderSets};

/// Resolves every stack of one design.
pub struct StackResolver<'a, D: ?Sized> {
    pub(super) design: &'a D,
    pub(super) config: ResolverConfig,
    pub(super) header_sets: HeaderSets,
}

impl<'a, D> StackResolver<'a, D>
where
    D: DesignAccessor + ?Sized,
{
    pub fn new(design: &'a D, config: ResolverConfig) -> Self {
        Self {
            design,
            config,
            header_sets: HeaderSets::new(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Header sets handed out so far. Shared by every pass of this resolver.
    pub fn header_sets(&self) -> &HeaderSets {
        &self.header_sets
    }

    /// Software instances that start a stack, in design order.
    pub fn roots(&self) -> Vec<InstanceId> {
        (0..self.design.instances().len())
            .map(InstanceId::new)
            .filter(|&id| {
                self.design.instance(id).is_some_and(|i| i.is_software())
                    && is_top_of_stack(self.design, id)
            })
            .collect()
    }

    /// Resolve one root completely: parts, objects and conflicts.
    pub fn resolve_root(
        &self,
        root: InstanceId,
        diagnostics: &mut DiagnosticCollector,
    ) -> Option<Stack> {
        let mut stack = self.resolve_stack(root, diagnostics)?;

        for part in 0..stack.parts.len() {
            let objects = self.resolve_objects(&stack, part, diagnostics);
            stack.objects.extend(objects);
        }

        stack.conflicts = find_conflicts(&stack, &self.config);
        for group in &stack.conflicts {
            diagnostics.file_conflict(&stack.name, &group.key.file_name, group.members.len());
        }

        tracing::debug!(
            "[STACK] '{}' resolved: {} part(s), {} object(s), {} conflict(s)",
            stack.name,
            stack.parts.len(),
            stack.objects.len(),
            stack.conflicts.len()
        );
        Some(stack)
    }
}

impl<'a, D> StackResolver<'a, D>
where
    D: DesignAccessor + Sync + ?Sized,
{
    /// Resolve every stack of the design.
    pub fn resolve(&self) -> StackRegistry {
        let roots = self.roots();
        tracing::debug!(
            "[STACK] resolving {} root(s){}",
            roots.len(),
            if self.config.parallel { " in parallel" } else { "" }
        );

        let resolve_one = |root: &InstanceId| {
            let mut diagnostics = DiagnosticCollector::new();
            let stack = self.resolve_root(*root, &mut diagnostics);
            (stack, diagnostics)
        };

        let results: Vec<(Option<Stack>, DiagnosticCollector)> = if self.config.parallel {
            roots.par_iter().map(resolve_one).collect()
        } else {
            roots.iter().map(resolve_one).collect()
        };

        let mut registry = StackRegistry::default();
        let mut diagnostics = DiagnosticCollector::new();
        for (stack, collected) in results {
            registry.stacks.extend(stack);
            diagnostics.extend(collected);
        }
        registry.diagnostics = diagnostics.into_diagnostics();
        registry
    }
}

/// Resolve a design with the given configuration.
pub fn resolve_design<D>(design: &D, config: ResolverConfig) -> StackRegistry
where
    D: DesignAccessor + Sync + ?Sized,
{
    StackResolver::new(design, config).resolve()
}
