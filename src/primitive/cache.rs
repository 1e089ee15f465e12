use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::foundation::core::BackendId;
use crate::primitive::catalog::BackendCatalog;
use crate::primitive::data::{Primitive, PrimitiveType, Representation};

/// Per-drawable cache of backend representations of one primitive.
///
/// Reads ([`get_primitive`](Self::get_primitive)) convert lazily along the catalog's
/// shortest convert chain and keep every intermediate result. Writes go through
/// [`begin_edit`](Self::begin_edit) / [`end_edit`](Self::end_edit): the representation
/// being edited is made private first (copy-on-write) and every other cached
/// representation is dropped, since it is about to go stale. While editing, every read
/// and every further `begin_edit` returns `None`.
///
/// Cloning a cache clones only the `Arc`s, never a payload. The cache uses interior
/// mutability for lazy conversion and must not be shared between threads.
pub struct PrimitiveCache {
    primitive_type: PrimitiveType,
    entries: RefCell<BTreeMap<BackendId, Representation>>,
    editing: bool,
}

impl Clone for PrimitiveCache {
    /// The clone starts outside edit mode and shares every representation.
    fn clone(&self) -> Self {
        Self {
            primitive_type: self.primitive_type,
            entries: RefCell::new(self.entries.borrow().clone()),
            editing: false,
        }
    }
}

impl std::fmt::Debug for PrimitiveCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimitiveCache")
            .field("primitive_type", &self.primitive_type)
            .field("backends", &self.cached_backends())
            .field("editing", &self.editing)
            .finish()
    }
}

fn type_matches(expected: PrimitiveType, primitive: &Primitive, origin: &str) -> bool {
    if primitive.primitive_type() == expected {
        return true;
    }
    tracing::warn!(
        ?expected,
        got = ?primitive.primitive_type(),
        "{origin} produced a payload of the wrong primitive type"
    );
    false
}

fn is_shared(rep: &Representation) -> bool {
    Arc::strong_count(rep) > 1 || Arc::weak_count(rep) > 0
}

impl PrimitiveCache {
    /// Empty cache for primitives of `primitive_type`.
    pub fn new(primitive_type: PrimitiveType) -> Self {
        Self {
            primitive_type,
            entries: RefCell::new(BTreeMap::new()),
            editing: false,
        }
    }

    /// Primitive type fixed at construction.
    pub fn primitive_type(&self) -> PrimitiveType {
        self.primitive_type
    }

    /// Return `true` between a successful `begin_edit` and `end_edit`.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Return `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Backends that currently hold a representation, ascending.
    pub fn cached_backends(&self) -> Vec<BackendId> {
        self.entries.borrow().keys().copied().collect()
    }

    /// Read-only representation for `target`, converting from a cached backend if needed.
    ///
    /// Returns `None` while editing, when the cache is empty, when no cached backend has a
    /// convert chain to `target`, or when a converter along the chain declines.
    pub fn get_primitive(
        &self,
        catalog: &BackendCatalog,
        target: BackendId,
    ) -> Option<Representation> {
        if self.editing || !target.is_registered() {
            return None;
        }

        let mut entries = self.entries.borrow_mut();
        if let Some(rep) = entries.get(&target) {
            return Some(Arc::clone(rep));
        }

        let chain = entries
            .keys()
            .filter_map(|&from| catalog.convert_chain(self.primitive_type, from, target))
            .min_by_key(|chain| chain.hops())?;

        let mut current = Arc::clone(entries.get(&chain.from())?);
        for step in chain.steps() {
            let next = step.apply(&current)?;
            if !type_matches(self.primitive_type, &next, "converter") {
                return None;
            }
            tracing::trace!(
                primitive_type = ?self.primitive_type,
                from = step.from.0,
                to = step.to.0,
                "converted representation"
            );
            entries.insert(step.to, Arc::clone(&next));
            current = next;
        }
        Some(current)
    }

    /// Make the cache hold exactly one private representation for `backend`.
    ///
    /// On success the caller may mutate the returned payload; nothing is touched on
    /// failure except conversions a `get_primitive` would have cached anyway.
    fn prepare_edit(&mut self, catalog: &BackendCatalog, backend: BackendId) -> Option<()> {
        if self.editing || !backend.is_registered() {
            return None;
        }

        if self.entries.get_mut().is_empty() {
            let created = catalog.create(self.primitive_type, backend)?;
            if !type_matches(self.primitive_type, &created, "factory") {
                return None;
            }
            self.entries.get_mut().insert(backend, Arc::new(created));
            return Some(());
        }

        let primitive_type = self.primitive_type;
        let rep = self.get_primitive(catalog, backend)?;
        let entries = self.entries.get_mut();

        // Holders that survive the edit: everything except `rep` itself and the entries
        // of this cache that are about to be discarded.
        let in_cache = entries.values().filter(|r| Arc::ptr_eq(r, &rep)).count();
        let outside = Arc::strong_count(&rep) - 1 - in_cache;
        if outside > 0 || Arc::weak_count(&rep) > 0 {
            let private = catalog.copy(primitive_type, backend, &rep)?;
            if !type_matches(primitive_type, &private, "copier") {
                return None;
            }
            entries.insert(backend, Arc::new(private));
        }
        drop(rep);

        entries.retain(|&id, _| id == backend);
        Some(())
    }

    /// Prepare the edit, raise the flag and hand out the payload with the flag.
    fn start_edit(
        &mut self,
        catalog: &BackendCatalog,
        backend: BackendId,
    ) -> Option<(&mut Primitive, &mut bool)> {
        self.prepare_edit(catalog, backend)?;
        let Self {
            entries, editing, ..
        } = self;
        let primitive = Arc::get_mut(entries.get_mut().get_mut(&backend)?)?;
        *editing = true;
        Some((primitive, editing))
    }

    /// Enter edit mode for `backend` and return its private, mutable payload.
    ///
    /// Creates the payload with the catalog's factory when the cache is empty; otherwise
    /// converts as [`get_primitive`](Self::get_primitive) would and copies the result if
    /// anything outside this cache still shares it.
    pub fn begin_edit(
        &mut self,
        catalog: &BackendCatalog,
        backend: BackendId,
    ) -> Option<&mut Primitive> {
        self.start_edit(catalog, backend).map(|(primitive, _)| primitive)
    }

    /// Leave edit mode. Does not check whether anything was modified.
    pub fn end_edit(&mut self) {
        self.editing = false;
    }

    /// Scoped edit: like [`begin_edit`](Self::begin_edit), with `end_edit` on drop.
    pub fn edit(
        &mut self,
        catalog: &BackendCatalog,
        backend: BackendId,
    ) -> Option<PrimitiveEdit<'_>> {
        self.start_edit(catalog, backend)
            .map(|(primitive, editing)| PrimitiveEdit { primitive, editing })
    }

    /// Mutable access to the payload being edited.
    ///
    /// If the payload was shared since `begin_edit` (by cloning this cache), it is copied
    /// again first; without a copier this returns `None`.
    pub fn editing_primitive_mut(&mut self, catalog: &BackendCatalog) -> Option<&mut Primitive> {
        if !self.editing {
            return None;
        }
        let primitive_type = self.primitive_type;
        let (&backend, rep) = self.entries.get_mut().iter_mut().next()?;
        if is_shared(rep) {
            let private = catalog.copy(primitive_type, backend, rep)?;
            if !type_matches(primitive_type, &private, "copier") {
                return None;
            }
            *rep = Arc::new(private);
        }
        Arc::get_mut(rep)
    }

    /// Replace the whole payload for `backend` in one edit.
    ///
    /// Returns `false` (and leaves the cache untouched) if the edit cannot start or
    /// `primitive` has the wrong type.
    pub fn store(
        &mut self,
        catalog: &BackendCatalog,
        backend: BackendId,
        primitive: Primitive,
    ) -> bool {
        if !type_matches(self.primitive_type, &primitive, "store") {
            return false;
        }
        match self.edit(catalog, backend) {
            Some(mut edit) => {
                *edit = primitive;
                true
            }
            None => false,
        }
    }
}

/// Edit scope returned by [`PrimitiveCache::edit`]; ends the edit when dropped.
pub struct PrimitiveEdit<'a> {
    primitive: &'a mut Primitive,
    editing: &'a mut bool,
}

impl Deref for PrimitiveEdit<'_> {
    type Target = Primitive;

    fn deref(&self) -> &Primitive {
        self.primitive
    }
}

impl DerefMut for PrimitiveEdit<'_> {
    fn deref_mut(&mut self) -> &mut Primitive {
        self.primitive
    }
}

impl Drop for PrimitiveEdit<'_> {
    fn drop(&mut self) {
        *self.editing = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/primitive/cache.rs"]
mod tests;
