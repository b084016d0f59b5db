//! Resolution output: stacks, their parts and object records, conflict groups.
//!
//! ```text
//! StackRegistry
//! ├── stacks: [Stack]
//! │     ├── parts:   [StackPart]     software parts in visitation order, hardware last
//! │     ├── objects: [ObjectRecord]  one per file, ObjectRecord::part → parts[i]
//! │     └── conflicts: [ConflictGroup] members → objects[i]
//! └── diagnostics: [Diagnostic]
//! ```
//!
//! A stack owns its parts and objects outright. The only shared values are
//! the per-instance header sets, held as `Arc<FileSet>` from the design-scoped
//! [`HeaderSets`](crate::model::HeaderSets) registry.

use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexSet;

use super::conflicts::find_conflicts;
use crate::base::{ComponentId, InstanceId, Name, join_flags};
use crate::config::ResolverConfig;
use crate::diagnostics::Diagnostic;
use crate::model::{Builder, BuilderLevel, File, FileSet};

// ============================================================================
// STACK PART
// ============================================================================

/// One resolved participant of a stack.
#[derive(Clone, Debug)]
pub struct StackPart {
    pub instance: Name,
    pub instance_id: InstanceId,
    pub component: ComponentId,
    pub view: Name,
    pub instantiation: Name,
    /// Builder chosen from the instantiation by the stack's reference file
    /// type. `None` only when the part falls back to the hardware builder.
    pub builder: Option<Builder>,
    /// Private header file set of the instance.
    pub header_set: Arc<FileSet>,
    pub is_hardware: bool,
}

impl StackPart {
    /// Flags of the part's own builder, if any.
    pub fn own_flags(&self) -> &str {
        self.builder.as_ref().map(|b| b.flags.as_ref()).unwrap_or("")
    }
}

// ============================================================================
// OBJECT RECORD
// ============================================================================

/// Resolved build configuration of one file within a stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectRecord {
    /// The source file as declared in its file set.
    pub file: File,
    pub file_name: Name,
    /// Absolute path, or `None` when it could not be resolved.
    pub path: Option<PathBuf>,
    pub file_set: Name,
    /// Index of the owning part in [`Stack::parts`].
    pub part: usize,
    /// Empty for headers.
    pub compiler: Name,
    /// Level the compiler was taken from; `None` for headers.
    pub compiler_source: Option<BuilderLevel>,
    pub flags: String,
    /// Whether the object is compiled. Initialized to `true` for every object
    /// with a compiler; the conflict-review layer may clear it.
    pub included_in_build: bool,
}

impl ObjectRecord {
    pub fn is_header(&self) -> bool {
        self.compiler.is_empty()
    }

    pub fn has_path(&self) -> bool {
        self.path.is_some()
    }
}

// ============================================================================
// CONFLICTS
// ============================================================================

/// Identity objects are grouped by when looking for conflicts.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConflictKey {
    pub file_name: Name,
    /// Set only when identity includes the path and the path is known.
    pub path: Option<PathBuf>,
}

impl std::fmt::Display for ConflictKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} ({})", self.file_name, path.display()),
            None => write!(f, "{}", self.file_name),
        }
    }
}

/// Two or more same-identity objects whose build configuration disagrees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictGroup {
    pub key: ConflictKey,
    /// Indices into [`Stack::objects`], in production order.
    pub members: Vec<usize>,
}

// ============================================================================
// STACK
// ============================================================================

/// An ordered chain of software parts terminated by their hardware host.
#[derive(Clone, Debug)]
pub struct Stack {
    /// Instance name of the first software part.
    pub name: Name,
    pub parts: Vec<StackPart>,
    pub objects: Vec<ObjectRecord>,
    /// Builder flags of the hardware part and every software part, in
    /// accumulation order, without duplicates.
    pub view_flags: IndexSet<Name>,
    /// File type of the hardware builder.
    pub reference_file_type: Name,
    /// Hardware builder; its command links the executable.
    pub hardware_builder: Builder,
    pub global_flags: Name,
    pub conflicts: Vec<ConflictGroup>,
}

impl Stack {
    /// The hardware part. Always the last part.
    pub fn hardware(&self) -> Option<&StackPart> {
        self.parts.last().filter(|p| p.is_hardware)
    }

    pub fn software_parts(&self) -> impl Iterator<Item = &StackPart> {
        self.parts.iter().filter(|p| !p.is_hardware)
    }

    pub fn part_of(&self, object: &ObjectRecord) -> Option<&StackPart> {
        self.parts.get(object.part)
    }

    pub fn find_part(&self, instance: &str) -> Option<&StackPart> {
        self.parts.iter().find(|p| p.instance.as_ref() == instance)
    }

    /// Objects owned by one part.
    pub fn objects_of<'a>(&'a self, instance: &'a str) -> impl Iterator<Item = &'a ObjectRecord> {
        self.objects
            .iter()
            .filter(move |o| {
                self.parts
                    .get(o.part)
                    .is_some_and(|p| p.instance.as_ref() == instance)
            })
    }

    /// Objects that are compiled into the executable.
    pub fn compiled_objects(&self) -> impl Iterator<Item = &ObjectRecord> {
        self.objects.iter().filter(|o| o.included_in_build)
    }

    /// Accumulated view flags joined by spaces.
    pub fn view_flag_string(&self) -> String {
        join_flags(self.view_flags.iter().map(|f| f.as_ref()))
    }

    /// Command that links the stack's executable.
    pub fn executable_builder(&self) -> &str {
        &self.hardware_builder.command
    }

    /// Global flags followed by the accumulated view flags.
    pub fn executable_flags(&self) -> String {
        join_flags(
            std::iter::once(self.global_flags.as_ref())
                .chain(self.view_flags.iter().map(|f| f.as_ref())),
        )
    }

    /// Set the included-in-build flag of one object.
    ///
    /// Returns `false` if the index is out of range.
    pub fn set_included(&mut self, object: usize, included: bool) -> bool {
        match self.objects.get_mut(object) {
            Some(record) => {
                record.included_in_build = included;
                true
            }
            None => false,
        }
    }

    /// Keep the first member of every conflict group and exclude the others.
    ///
    /// Groups are left in place so the ambiguity stays visible.
    pub fn apply_first_wins(&mut self) {
        let excluded: Vec<usize> = self
            .conflicts
            .iter()
            .flat_map(|group| group.members.iter().skip(1).copied())
            .collect();
        for index in excluded {
            self.set_included(index, false);
        }
    }

    /// Recompute conflict groups from the current objects.
    pub fn refresh_conflicts(&mut self, config: &ResolverConfig) {
        self.conflicts = find_conflicts(self, config);
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Members of a conflict group as object records.
    pub fn conflict_members<'a>(
        &'a self,
        group: &'a ConflictGroup,
    ) -> impl Iterator<Item = &'a ObjectRecord> {
        group.members.iter().filter_map(|&i| self.objects.get(i))
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Every resolved stack of one design, plus the notices of the pass.
#[derive(Clone, Debug, Default)]
pub struct StackRegistry {
    pub stacks: Vec<Stack>,
    pub diagnostics: Vec<Diagnostic>,
}

impl StackRegistry {
    pub fn get(&self, name: &str) -> Option<&Stack> {
        self.stacks.iter().find(|s| s.name.as_ref() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Stack> {
        self.stacks.iter_mut().find(|s| s.name.as_ref() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stack> {
        self.stacks.iter()
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Every conflict group of every stack, in stack order.
    pub fn all_conflicts(&self) -> impl Iterator<Item = (&Stack, &ConflictGroup)> {
        self.stacks
            .iter()
            .flat_map(|stack| stack.conflicts.iter().map(move |group| (stack, group)))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
