//! Non-fatal notices produced by a resolution pass.
//!
//! Resolution never fails. Every condition that drops an instance, abandons
//! a stack, or leaves an ambiguity is recorded as a [`Diagnostic`] and
//! returned next to the resolved stacks.

use std::fmt;
use std::sync::Arc;

use crate::base::Name;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Info,
}

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// One instance was dropped from its stack; the walk went on.
    Prune,
    /// A whole stack was omitted from the registry.
    StackAbandon,
    /// Same-identity objects disagree on their build configuration.
    Conflict,
    /// A file path could not be resolved; the object was kept.
    UnresolvedPath,
    /// An instantiation references a file set its component lacks.
    MissingFileSet,
}

/// A resolution notice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    /// Stable code (e.g., "S0001").
    pub code: &'static str,
    /// Root instance name of the stack concerned.
    pub stack: Option<Name>,
    /// Instance concerned, when narrower than the stack.
    pub instance: Option<Name>,
    pub message: Arc<str>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, code: &'static str, message: impl Into<Arc<str>>) -> Self {
        let severity = match kind {
            DiagnosticKind::Prune | DiagnosticKind::MissingFileSet => Severity::Info,
            DiagnosticKind::StackAbandon
            | DiagnosticKind::Conflict
            | DiagnosticKind::UnresolvedPath => Severity::Warning,
        };
        Self {
            kind,
            severity,
            code,
            stack: None,
            instance: None,
            message: message.into(),
        }
    }

    pub fn with_stack(mut self, stack: impl Into<Name>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_instance(mut self, instance: impl Into<Name>) -> Self {
        self.instance = Some(instance.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.code)?;
        if let Some(stack) = &self.stack {
            write!(f, " {stack}:")?;
        }
        write!(f, " {}", self.message)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Stable diagnostic codes.
///
/// ## Code Ranges
///
/// - **S0001-S0099**: instance prunes
/// - **S0101-S0199**: stack abandons
/// - **S0201-S0299**: conflicts
/// - **S0301-S0399**: file-level notices
pub mod codes {
    /// Instance has no active view, or the view does not exist.
    pub const MISSING_VIEW: &str = "S0001";
    /// View references no instantiation, or a missing one.
    pub const MISSING_INSTANTIATION: &str = "S0002";
    /// Instantiation has no builder of the reference file type.
    pub const MISSING_BUILDER: &str = "S0003";

    /// Root instance is not mapped to any hardware.
    pub const NO_HARDWARE_MAPPING: &str = "S0101";
    /// Mapped hardware is missing or has no usable view/instantiation.
    pub const UNRESOLVED_HARDWARE: &str = "S0102";
    /// Hardware instantiation has no default builder.
    pub const NO_HARDWARE_BUILDER: &str = "S0103";
    /// Walk produced no software parts.
    pub const EMPTY_STACK: &str = "S0104";

    /// Same-identity objects with divergent build configuration.
    pub const FILE_CONFLICT: &str = "S0201";

    /// File path could not be resolved.
    pub const UNRESOLVED_PATH: &str = "S0301";
    /// Referenced file set does not exist.
    pub const MISSING_FILE_SET: &str = "S0302";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during resolution.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic and log it.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        match diagnostic.kind {
            DiagnosticKind::Prune | DiagnosticKind::MissingFileSet => {
                tracing::debug!("{}", diagnostic)
            }
            DiagnosticKind::StackAbandon | DiagnosticKind::Conflict => {
                tracing::info!("{}", diagnostic)
            }
            DiagnosticKind::UnresolvedPath => tracing::warn!("{}", diagnostic),
        }
        self.diagnostics.push(diagnostic);
    }

    /// Move all diagnostics of another collector into this one.
    pub fn extend(&mut self, other: DiagnosticCollector) {
        self.diagnostics.extend(other.diagnostics);
    }

    // ── Prunes ──────────────────────────────────────────────────────

    pub fn missing_view(&mut self, stack: &str, instance: &str, view: Option<&str>) {
        let message = match view {
            Some(view) => format!("instance '{instance}' pruned: view '{view}' not found"),
            None => format!("instance '{instance}' pruned: no active view"),
        };
        self.add(
            Diagnostic::new(DiagnosticKind::Prune, codes::MISSING_VIEW, message)
                .with_stack(stack)
                .with_instance(instance),
        );
    }

    pub fn missing_instantiation(&mut self, stack: &str, instance: &str, view: &str) {
        self.add(
            Diagnostic::new(
                DiagnosticKind::Prune,
                codes::MISSING_INSTANTIATION,
                format!("instance '{instance}' pruned: view '{view}' has no instantiation"),
            )
            .with_stack(stack)
            .with_instance(instance),
        );
    }

    pub fn missing_builder(&mut self, stack: &str, instance: &str, file_type: &str) {
        self.add(
            Diagnostic::new(
                DiagnosticKind::Prune,
                codes::MISSING_BUILDER,
                format!("instance '{instance}' pruned: no builder for file type '{file_type}'"),
            )
            .with_stack(stack)
            .with_instance(instance),
        );
    }

    // ── Stack abandons ──────────────────────────────────────────────

    pub fn no_hardware_mapping(&mut self, root: &str) {
        self.add(
            Diagnostic::new(
                DiagnosticKind::StackAbandon,
                codes::NO_HARDWARE_MAPPING,
                format!("stack '{root}' skipped: instance is not mapped to hardware"),
            )
            .with_stack(root),
        );
    }

    pub fn unresolved_hardware(&mut self, root: &str, hardware: &str) {
        self.add(
            Diagnostic::new(
                DiagnosticKind::StackAbandon,
                codes::UNRESOLVED_HARDWARE,
                format!(
                    "stack '{root}' skipped: hardware '{hardware}' is missing or has no usable view"
                ),
            )
            .with_stack(root)
            .with_instance(hardware),
        );
    }

    pub fn no_hardware_builder(&mut self, root: &str, hardware: &str) {
        self.add(
            Diagnostic::new(
                DiagnosticKind::StackAbandon,
                codes::NO_HARDWARE_BUILDER,
                format!("stack '{root}' skipped: hardware '{hardware}' has no build command"),
            )
            .with_stack(root)
            .with_instance(hardware),
        );
    }

    pub fn empty_stack(&mut self, root: &str) {
        self.add(
            Diagnostic::new(
                DiagnosticKind::StackAbandon,
                codes::EMPTY_STACK,
                format!("stack '{root}' skipped: no software part could be resolved"),
            )
            .with_stack(root),
        );
    }

    // ── Conflicts and file notices ──────────────────────────────────

    pub fn file_conflict(&mut self, stack: &str, file: &str, members: usize) {
        self.add(
            Diagnostic::new(
                DiagnosticKind::Conflict,
                codes::FILE_CONFLICT,
                format!("file '{file}' is built {members} times with different settings"),
            )
            .with_stack(stack),
        );
    }

    pub fn unresolved_path(&mut self, stack: &str, instance: &str, file: &str) {
        self.add(
            Diagnostic::new(
                DiagnosticKind::UnresolvedPath,
                codes::UNRESOLVED_PATH,
                format!("path of file '{file}' could not be resolved"),
            )
            .with_stack(stack)
            .with_instance(instance),
        );
    }

    pub fn missing_file_set(&mut self, stack: &str, instance: &str, file_set: &str) {
        self.add(
            Diagnostic::new(
                DiagnosticKind::MissingFileSet,
                codes::MISSING_FILE_SET,
                format!("file set '{file_set}' referenced by '{instance}' does not exist"),
            )
            .with_stack(stack)
            .with_instance(instance),
        );
    }

    // ── Queries ─────────────────────────────────────────────────────

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Diagnostics of one kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.kind == kind).collect()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
