//! Process-wide descriptor cache.
//!
//! Descriptors are keyed by `(owner type, field)`. The first request for a key
//! builds the descriptor; every later request returns the same shared
//! instance. Concurrent first requests may both build a descriptor, but only
//! one is inserted and both callers receive it, so a key never maps to two
//! different descriptors. After warm-up the cache is read-only and lookups take
//! only the read lock.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::descriptor::{FieldDef, FieldDescriptor, MaxOccurs, TypeName};

type CacheKey = (TypeName, &'static str);

static GLOBAL: LazyLock<DescriptorCache> = LazyLock::new(DescriptorCache::new);

/// Memoized `(owner type, field) -> descriptor` lookup.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    entries: RwLock<HashMap<CacheKey, Arc<FieldDescriptor>>>,
}

impl DescriptorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache shared by every [`TypeSchema`](crate::TypeSchema) in the process.
    pub fn global() -> &'static DescriptorCache {
        &GLOBAL
    }

    /// Returns the descriptor for `(owner, def.field)`, building it on first use.
    pub fn describe_def(&self, owner: TypeName, def: &FieldDef) -> Arc<FieldDescriptor> {
        let key = (owner, def.field);
        if let Some(existing) = self.entries.read().get(&key) {
            return Arc::clone(existing);
        }

        let built = Arc::new(def.to_descriptor());
        let mut entries = self.entries.write();
        let entry = entries.entry(key).or_insert_with(|| {
            tracing::trace!(owner = %owner, field = def.field, "cached field descriptor");
            Arc::clone(&built)
        });
        if **entry != *built {
            tracing::warn!(
                owner = %owner,
                field = def.field,
                cached = %entry,
                requested = %built,
                "conflicting descriptor definition; keeping the cached one"
            );
        }
        Arc::clone(entry)
    }

    pub fn get(&self, owner: TypeName, field: &'static str) -> Option<Arc<FieldDescriptor>> {
        self.entries.read().get(&(owner, field)).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Looks up or creates the shared descriptor for one field of `owner`.
///
/// This is the entry point generated code uses; it never fails and grows the
/// global cache by at most one entry.
#[allow(clippy::too_many_arguments)]
pub fn describe(
    owner: TypeName,
    field_name: &'static str,
    namespace: &'static str,
    local_name: &'static str,
    type_namespace: &'static str,
    type_name: &'static str,
    min_occurs: u32,
    max_occurs: MaxOccurs,
    qualified: bool,
) -> Arc<FieldDescriptor> {
    let def = FieldDef {
        field: field_name,
        namespace,
        name: local_name,
        type_name: TypeName::new(type_namespace, type_name),
        min_occurs,
        max_occurs,
        qualified,
    };
    DescriptorCache::global().describe_def(owner, &def)
}
