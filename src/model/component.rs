//! Component-level model: interfaces, views, instantiations, file sets, builders.
//!
//! ```text
//! Component
//! ├── interfaces: [ApiInterface]          (name + dependency direction)
//! ├── views: [View] ──────────────┐       (view → instantiation by name)
//! ├── instantiations: [Instantiation] ◄┘
//! │     ├── default_builders: [Builder]   (view-default level)
//! │     └── file_set_refs: [Name] ──┐
//! └── file_sets: [FileSet] ◄────────┘
//!       ├── default_builders: [Builder]   (file-set level)
//!       └── files: [File]
//!             └── build_command: Builder  (file level)
//! ```

use std::path::{Path, PathBuf};

use crate::base::Name;

#[cfg(feature = "interchange")]
use serde::{Deserialize, Serialize};

// ============================================================================
// INTERFACES
// ============================================================================

/// Dependency direction of an API interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "lowercase"))]
pub enum DependencyDirection {
    /// The interface consumes a service.
    Requester,
    /// The interface serves another instance.
    Provider,
}

/// An API interface of a component.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
pub struct ApiInterface {
    pub name: Name,
    pub direction: DependencyDirection,
}

// ============================================================================
// BUILDERS
// ============================================================================

/// Specificity level a builder was declared at.
///
/// Ordered from most to least specific; compiler lookup walks the levels in
/// this order and stops at the first non-empty command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuilderLevel {
    /// Attached directly to one file.
    File,
    /// Default builder of the file set owning the file.
    FileSet,
    /// Default builder of the instance's active view.
    View,
    /// Default builder of the hosting hardware's active view.
    Hardware,
}

/// A (file type, compiler, flags) build command.
///
/// File-level builders leave `file_type` empty; they apply to their file
/// whatever its type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "interchange", serde(default))]
pub struct Builder {
    pub file_type: Name,
    pub command: Name,
    pub flags: Name,
    /// Drop the flags of less specific levels instead of appending to them.
    pub replace_default_flags: bool,
}

impl Builder {
    /// Create a builder for one file type.
    pub fn new(
        file_type: impl Into<Name>,
        command: impl Into<Name>,
        flags: impl Into<Name>,
    ) -> Self {
        Self {
            file_type: file_type.into(),
            command: command.into(),
            flags: flags.into(),
            replace_default_flags: false,
        }
    }

    /// Create a file-level build command (no file type).
    pub fn for_file(command: impl Into<Name>, flags: impl Into<Name>) -> Self {
        Self::new("", command, flags)
    }

    /// Set the replace-default-flags bit.
    pub fn replacing(mut self) -> Self {
        self.replace_default_flags = true;
        self
    }

    /// True if this builder names a compiler.
    pub fn has_command(&self) -> bool {
        !self.command.trim().is_empty()
    }

    /// True if this builder applies to the given file.
    pub fn applies_to(&self, file: &File) -> bool {
        file.has_type(&self.file_type)
    }
}

// ============================================================================
// FILES
// ============================================================================

/// A file of a component.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
pub struct File {
    /// Path as written in the component, usually relative to its directory.
    pub name: Name,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub file_types: Vec<Name>,
    /// Include files are never compiled on their own.
    #[cfg_attr(feature = "interchange", serde(default))]
    pub is_include: bool,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub build_command: Option<Builder>,
}

impl File {
    pub fn new(name: impl Into<Name>, file_type: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            file_types: vec![file_type.into()],
            is_include: false,
            build_command: None,
        }
    }

    /// Mark the file as an include file.
    pub fn include(mut self) -> Self {
        self.is_include = true;
        self
    }

    /// Attach a file-level build command.
    pub fn with_build_command(mut self, builder: Builder) -> Self {
        self.build_command = Some(builder);
        self
    }

    /// Add a further file type.
    pub fn with_type(mut self, file_type: impl Into<Name>) -> Self {
        let file_type = file_type.into();
        if !self.has_type(&file_type) {
            self.file_types.push(file_type);
        }
        self
    }

    pub fn has_type(&self, file_type: &str) -> bool {
        self.file_types.iter().any(|t| t.as_ref() == file_type)
    }

    /// The bare file name, without directories.
    pub fn file_name(&self) -> &str {
        let trimmed = self.name.trim_end_matches(['/', '\\']);
        trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed)
    }

    /// Resolve the absolute path of this file against a component directory.
    ///
    /// Returns `None` when the file has no name, or when the name is
    /// relative and the component has no directory.
    pub fn resolve_path(&self, directory: Option<&Path>) -> Option<PathBuf> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        let path = Path::new(name);
        if path.is_absolute() {
            return Some(path.to_path_buf());
        }
        directory.map(|dir| dir.join(path))
    }
}

/// A named, ordered group of files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
pub struct FileSet {
    pub name: Name,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub files: Vec<File>,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub default_builders: Vec<Builder>,
}

impl FileSet {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            default_builders: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: File) -> Self {
        self.files.push(file);
        self
    }

    pub fn with_builder(mut self, builder: Builder) -> Self {
        self.default_builders.push(builder);
        self
    }

    /// First default builder of `file_type`, if the file carries that type.
    pub fn builder_for(&self, file: &File, file_type: &str) -> Option<&Builder> {
        self.default_builders
            .iter()
            .find(|b| b.file_type.as_ref() == file_type && b.applies_to(file))
    }

    pub fn find_file(&self, name: &str) -> Option<&File> {
        self.files.iter().find(|f| f.name.as_ref() == name)
    }

    pub fn find_file_mut(&mut self, name: &str) -> Option<&mut File> {
        self.files.iter_mut().find(|f| f.name.as_ref() == name)
    }
}

// ============================================================================
// VIEWS AND INSTANTIATIONS
// ============================================================================

/// A named view selecting one instantiation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
pub struct View {
    pub name: Name,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub instantiation: Option<Name>,
}

impl View {
    pub fn new(name: impl Into<Name>, instantiation: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            instantiation: Some(instantiation.into()),
        }
    }

    /// A view that references no instantiation.
    pub fn empty(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            instantiation: None,
        }
    }
}

/// Build settings of a view: default builders and referenced file sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
pub struct Instantiation {
    pub name: Name,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub default_builders: Vec<Builder>,
    #[cfg_attr(feature = "interchange", serde(default))]
    pub file_set_refs: Vec<Name>,
}

impl Instantiation {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            default_builders: Vec::new(),
            file_set_refs: Vec::new(),
        }
    }

    pub fn with_builder(mut self, builder: Builder) -> Self {
        self.default_builders.push(builder);
        self
    }

    pub fn with_file_set_ref(mut self, file_set: impl Into<Name>) -> Self {
        self.file_set_refs.push(file_set.into());
        self
    }

    /// First default builder of the given file type.
    pub fn builder_for_type(&self, file_type: &str) -> Option<&Builder> {
        self.default_builders
            .iter()
            .find(|b| b.file_type.as_ref() == file_type)
    }
}

// ============================================================================
// COMPONENT
// ============================================================================

/// A hardware or software component.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "interchange", serde(default))]
pub struct Component {
    pub name: Name,
    /// Directory the component document lives in; relative file names
    /// resolve against it.
    pub directory: Option<PathBuf>,
    pub interfaces: Vec<ApiInterface>,
    pub views: Vec<View>,
    pub instantiations: Vec<Instantiation>,
    pub file_sets: Vec<FileSet>,
}

impl Component {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_interface(mut self, name: impl Into<Name>, direction: DependencyDirection) -> Self {
        self.interfaces.push(ApiInterface {
            name: name.into(),
            direction,
        });
        self
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.views.push(view);
        self
    }

    pub fn with_instantiation(mut self, instantiation: Instantiation) -> Self {
        self.instantiations.push(instantiation);
        self
    }

    pub fn with_file_set(mut self, file_set: FileSet) -> Self {
        self.file_sets.push(file_set);
        self
    }

    pub fn interface(&self, name: &str) -> Option<&ApiInterface> {
        self.interfaces.iter().find(|i| i.name.as_ref() == name)
    }

    pub fn find_view(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|v| v.name.as_ref() == name)
    }

    pub fn find_instantiation(&self, name: &str) -> Option<&Instantiation> {
        self.instantiations.iter().find(|i| i.name.as_ref() == name)
    }

    pub fn find_instantiation_mut(&mut self, name: &str) -> Option<&mut Instantiation> {
        self.instantiations
            .iter_mut()
            .find(|i| i.name.as_ref() == name)
    }

    pub fn find_file_set(&self, name: &str) -> Option<&FileSet> {
        self.file_sets.iter().find(|f| f.name.as_ref() == name)
    }

    pub fn find_file_set_mut(&mut self, name: &str) -> Option<&mut FileSet> {
        self.file_sets.iter_mut().find(|f| f.name.as_ref() == name)
    }

    /// Instantiation selected by the named view, if both exist.
    pub fn instantiation_of_view(&self, view: &str) -> Option<&Instantiation> {
        let reference = self.find_view(view)?.instantiation.as_deref()?;
        self.find_instantiation(reference)
    }
}
