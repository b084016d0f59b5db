//! # swstack-base
//!
//! Software build-stack resolution for hardware/software designs.
//!
//! Given a design of component instances wired by requester/provider API
//! connections, the resolver finds every independently buildable software
//! stack, resolves a compiler and flag string for each file through a
//! file / file-set / view / hardware override scheme, and reports files that
//! are reached twice within one stack with divergent settings.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! stack        → discovery, object resolution, conflict detection, registry
//!   ↓
//! diagnostics  → prune / abandon / conflict notices
//!   ↓
//! config       → ResolverConfig and its policies
//!   ↓
//! model        → immutable design snapshot, DesignAccessor, header sets
//!   ↓
//! base         → typed ids, shared names, constants
//! ```

// ============================================================================
// MODULES (dependency order: base → model → config → diagnostics → stack)
// ============================================================================

/// Foundation types: ids, names, flag joining
pub mod base;

/// Design model: components, instances, connections, header sets
pub mod model;

/// Resolver configuration
pub mod config;

/// Non-fatal resolution notices
pub mod diagnostics;

/// Stack discovery, build command resolution, conflict detection
pub mod stack;

/// Design and configuration documents: JSON, YAML
#[cfg(feature = "interchange")]
pub mod interchange;

// Re-export foundation types
pub use base::{ComponentId, InstanceId, Name};

// Re-export the resolution surface
pub use config::{ConflictIdentity, FlagComparison, ResolverConfig, SoftwareBuilderPolicy};
pub use diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticKind, Severity};
pub use model::{DesignAccessor, DesignBuilder, DesignSnapshot, ModelError};
pub use stack::{
    ConflictGroup, ObjectRecord, Stack, StackPart, StackRegistry, StackResolver, resolve_design,
};
