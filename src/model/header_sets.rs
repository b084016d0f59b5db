//! Per-instance header file sets.
//!
//! Every stack part owns a private header file set named `<instance>_headers`.
//! The set lives on the design's top component when the user has created it;
//! otherwise it is created empty on first reference. The registry never
//! writes into the snapshot: it adopts or creates the set once per key and
//! hands out the same shared value afterwards.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;

use super::accessor::DesignAccessor;
use super::component::FileSet;
use crate::base::Name;
use crate::base::constants::HEADER_SET_SUFFIX;

/// Registry key: system view plus instance name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HeaderSetKey {
    pub system_view: Name,
    pub instance: Name,
}

impl HeaderSetKey {
    pub fn new(system_view: impl Into<Name>, instance: impl Into<Name>) -> Self {
        Self {
            system_view: system_view.into(),
            instance: instance.into(),
        }
    }

    /// Name of the file set this key maps to.
    pub fn file_set_name(&self) -> Name {
        header_set_name(&self.instance)
    }
}

/// Name of the header file set of an instance.
pub fn header_set_name(instance: &str) -> Name {
    Name::from(format!("{instance}{HEADER_SET_SUFFIX}"))
}

/// Design-scoped get-or-create registry of header file sets.
///
/// Safe to share between threads resolving different roots; lookups of the
/// same key are serialized by the inner lock.
#[derive(Debug, Default)]
pub struct HeaderSets {
    sets: Mutex<IndexMap<HeaderSetKey, Arc<FileSet>>>,
}

impl HeaderSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the header set of `instance`, adopting or creating it on first use.
    pub fn get_or_create<D>(&self, design: &D, instance: &str) -> Arc<FileSet>
    where
        D: DesignAccessor + ?Sized,
    {
        let key = HeaderSetKey::new(design.system_view(), instance);
        let mut sets = self.sets.lock();
        if let Some(existing) = sets.get(&key) {
            return Arc::clone(existing);
        }

        let name = key.file_set_name();
        let set = design
            .top_component()
            .and_then(|top| top.find_file_set(&name))
            .cloned()
            .unwrap_or_else(|| FileSet::new(name.clone()));
        tracing::trace!(
            "[HEADERS] registered '{}' ({} file(s)) for system view '{}'",
            name,
            set.files.len(),
            key.system_view
        );

        let set = Arc::new(set);
        sets.insert(key, Arc::clone(&set));
        set
    }

    /// Look up a set without creating it.
    pub fn get(&self, key: &HeaderSetKey) -> Option<Arc<FileSet>> {
        self.sets.lock().get(key).cloned()
    }

    /// Number of registered sets.
    pub fn len(&self) -> usize {
        self.sets.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.lock().is_empty()
    }
}
