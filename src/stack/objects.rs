//! Per-file build command resolution.
//!
//! Compiler lookup stops at the first level with a non-empty command:
//!
//! ```text
//! File build command ─► FileSet default builder ─► part's view builder ─► hardware builder
//!   (any type)            (reference type)           (reference type)       (reference type)
//! ```
//!
//! Flags are additive in a fixed order, `global view file-set file`, unless a
//! builder sets `replace_default_flags`. Files without a compiler, and all
//! include files, are kept as headers.

use std::path::Path;

use super::resolver::StackResolver;
use super::types::{ObjectRecord, Stack, StackPart};
use crate::base::{Name, join_flags};
use crate::diagnostics::DiagnosticCollector;
use crate::model::{Builder, BuilderLevel, DesignAccessor, File, FileSet};

/// Merge the flag segments of one object.
///
/// `view` is the view segment as already narrowed by a view-level replace.
/// A file-level replace keeps `global file`; a file-set replace keeps
/// `global file-set file`. Empty segments are omitted.
pub fn merge_flags(
    global: &str,
    view: &str,
    file_set: Option<&Builder>,
    file: Option<&Builder>,
) -> String {
    let set_flags = file_set.map(|b| b.flags.as_ref()).unwrap_or("");
    let file_flags = file.map(|b| b.flags.as_ref()).unwrap_or("");

    if file.is_some_and(|b| b.replace_default_flags) {
        return join_flags([global, file_flags]);
    }
    if file_set.is_some_and(|b| b.replace_default_flags) {
        return join_flags([global, set_flags, file_flags]);
    }
    join_flags([global, view, set_flags, file_flags])
}

/// Compiler of a file and the level it came from.
fn select_compiler<'b>(
    stack: &'b Stack,
    part: &'b StackPart,
    file_set: &'b FileSet,
    file: &'b File,
) -> Option<(&'b Builder, BuilderLevel)> {
    let candidates = [
        (file.build_command.as_ref(), BuilderLevel::File),
        (
            file_set.builder_for(file, &stack.reference_file_type),
            BuilderLevel::FileSet,
        ),
        (
            part.builder.as_ref().filter(|b| b.applies_to(file)),
            BuilderLevel::View,
        ),
        (
            Some(&stack.hardware_builder).filter(|b| b.applies_to(file)),
            BuilderLevel::Hardware,
        ),
    ];
    candidates
        .into_iter()
        .find_map(|(builder, level)| builder.filter(|b| b.has_command()).map(|b| (b, level)))
}

impl<'a, D> StackResolver<'a, D>
where
    D: DesignAccessor + ?Sized,
{
    /// Produce one object record for every file reachable from a part.
    ///
    /// Files of the instantiation's file sets come first, in reference order,
    /// then the files of the part's header set.
    pub fn resolve_objects(
        &self,
        stack: &Stack,
        part_index: usize,
        diagnostics: &mut DiagnosticCollector,
    ) -> Vec<ObjectRecord> {
        let Some(part) = stack.parts.get(part_index) else {
            return Vec::new();
        };
        let Some(component) = self.design.component(part.component) else {
            return Vec::new();
        };

        let mut objects = Vec::new();
        let directory = component.directory.as_deref();
        if let Some(instantiation) = component.find_instantiation(&part.instantiation) {
            for set_name in &instantiation.file_set_refs {
                let Some(file_set) = component.find_file_set(set_name) else {
                    diagnostics.missing_file_set(&stack.name, &part.instance, set_name);
                    continue;
                };
                for file in &file_set.files {
                    objects.push(self.resolve_file(
                        stack,
                        (part_index, part),
                        file_set,
                        file,
                        directory,
                        diagnostics,
                    ));
                }
            }
        }

        let header_directory = self
            .design
            .top_component()
            .and_then(|top| top.directory.as_deref());
        for file in &part.header_set.files {
            objects.push(self.resolve_file(
                stack,
                (part_index, part),
                &part.header_set,
                file,
                header_directory,
                diagnostics,
            ));
        }

        objects
    }

    fn resolve_file(
        &self,
        stack: &Stack,
        (part_index, part): (usize, &StackPart),
        file_set: &FileSet,
        file: &File,
        directory: Option<&Path>,
        diagnostics: &mut DiagnosticCollector,
    ) -> ObjectRecord {
        let path = file.resolve_path(directory);
        if path.is_none() {
            diagnostics.unresolved_path(&stack.name, &part.instance, &file.name);
        }

        let compiler = if file.is_include {
            None
        } else {
            select_compiler(stack, part, file_set, file)
        };

        let mut record = ObjectRecord {
            file: file.clone(),
            file_name: Name::from(file.file_name()),
            path,
            file_set: file_set.name.clone(),
            part: part_index,
            compiler: Name::from(""),
            compiler_source: None,
            flags: String::new(),
            included_in_build: false,
        };

        let Some((builder, level)) = compiler else {
            tracing::trace!("[OBJECTS] {}: '{}' is a header", stack.name, file.name);
            return record;
        };

        let view = match part.builder.as_ref() {
            Some(own) if own.replace_default_flags => join_flags([own.flags.as_ref()]),
            _ => stack.view_flag_string(),
        };
        record.flags = merge_flags(
            &stack.global_flags,
            &view,
            file_set.builder_for(file, &stack.reference_file_type),
            file.build_command.as_ref(),
        );
        record.compiler = builder.command.clone();
        record.compiler_source = Some(level);
        record.included_in_build = true;

        tracing::trace!(
            "[OBJECTS] {}: '{}' → {} ({:?}) {}",
            stack.name,
            file.name,
            record.compiler,
            level,
            record.flags
        );
        record
    }
}
