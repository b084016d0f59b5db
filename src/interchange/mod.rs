//! Design and configuration documents.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐
//! │  design.json │     │  design.yaml │
//! └──────┬───────┘     └──────┬───────┘
//!        └─────────┬──────────┘
//!                  ▼
//!        DocumentFormat::decode
//!                  │
//!                  ▼
//!   DesignDocument (names) ──► DesignBuilder ──► DesignSnapshot (ids)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use swstack::interchange::{load_config, load_design};
//! use swstack::resolve_design;
//!
//! let design = load_design("design.yaml")?;
//! let config = load_config("resolver.yaml")?;
//! let registry = resolve_design(&design, config);
//! ```

mod document;
mod error;
mod format;

pub use document::{
    DesignDocument, InstanceEntry, load_config, load_design, read_config, read_design,
    write_design,
};
pub use error::InterchangeError;
pub use format::DocumentFormat;
