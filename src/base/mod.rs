//! Foundation types for the stack resolver.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Name`] - Shared, cheap-to-clone names for instances, views, files
//! - [`ComponentId`], [`InstanceId`] - Arena indices into a design snapshot
//! - Domain constants (default flag placeholders, header-set suffix)
//!
//! This module has NO dependencies on other swstack modules.

pub mod constants;
mod ids;

pub use ids::{ComponentId, InstanceId};

use std::sync::Arc;

/// A shared name. Cloning only bumps a reference count.
pub type Name = Arc<str>;

/// Join non-empty flag segments with single spaces, preserving order.
///
/// Segments are trimmed first, so a segment consisting only of whitespace
/// counts as empty.
pub fn join_flags<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut joined = String::new();
    for segment in segments {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(segment);
    }
    joined
}
