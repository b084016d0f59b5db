//! Design model: the read-only input of a resolution pass.
//!
//! ```text
//! DesignSnapshot
//! ├── components: [Component]        (arena, ComponentId)
//! └── design: Design
//!     ├── instances: [Instance]      (arena, InstanceId)
//!     ├── connections: [Connection]  (endpoints resolved to InstanceId)
//!     └── active_views: instance → view
//! ```
//!
//! The resolver queries the model through [`DesignAccessor`]. The only shared
//! state it creates is the per-instance header file set, handed out by the
//! idempotent [`HeaderSets`] registry.

mod accessor;
mod component;
mod design;
mod error;
mod header_sets;

pub use accessor::DesignAccessor;
pub use component::{
    ApiInterface, Builder, BuilderLevel, Component, DependencyDirection, File, FileSet,
    Instantiation, View,
};
pub use design::{
    Connection, Design, DesignBuilder, DesignSnapshot, Endpoint, Instance, InstanceKind,
};
pub use error::ModelError;
pub use header_sets::{HeaderSetKey, HeaderSets, header_set_name};
