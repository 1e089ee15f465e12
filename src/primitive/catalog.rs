use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;

use crate::foundation::core::BackendId;
use crate::primitive::data::{Primitive, PrimitiveType, Representation};

/// Builds a fresh payload for one (primitive type, backend) pair.
pub type CreateFn = Arc<dyn Fn() -> Primitive + Send + Sync>;
/// Deep-copies a payload so it can be mutated privately. `None` declines.
pub type CopyFn = Arc<dyn Fn(&Primitive) -> Option<Primitive> + Send + Sync>;
/// Converts one backend's representation into another's. `None` declines.
///
/// Returning a clone of the input `Arc` shares the payload between the two backends.
pub type ConvertFn = Arc<dyn Fn(&Representation) -> Option<Representation> + Send + Sync>;

/// Converter that shares the payload unchanged between two backends.
pub fn share_representation(rep: &Representation) -> Option<Representation> {
    Some(Arc::clone(rep))
}

/// One hop of a [`ConvertChain`].
#[derive(Clone)]
pub struct ConvertStep {
    /// Source backend.
    pub from: BackendId,
    /// Destination backend.
    pub to: BackendId,
    func: ConvertFn,
}

impl ConvertStep {
    /// Run the converter.
    pub fn apply(&self, rep: &Representation) -> Option<Representation> {
        (self.func)(rep)
    }
}

impl std::fmt::Debug for ConvertStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConvertStep")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

/// Shortest known sequence of converters between two backends, for one primitive type.
#[derive(Clone, Debug)]
pub struct ConvertChain {
    steps: Vec<ConvertStep>,
}

impl ConvertChain {
    /// Number of converter invocations.
    pub fn hops(&self) -> usize {
        self.steps.len()
    }

    /// Steps in application order.
    pub fn steps(&self) -> &[ConvertStep] {
        &self.steps
    }

    /// Backend the chain starts from.
    pub fn from(&self) -> BackendId {
        self.steps.first().map_or(BackendId::UNREGISTERED, |s| s.from)
    }

    /// Backend the chain ends at.
    pub fn to(&self) -> BackendId {
        self.steps.last().map_or(BackendId::UNREGISTERED, |s| s.to)
    }

    /// Backends visited, source first.
    pub fn path(&self) -> Vec<BackendId> {
        let mut out: Vec<BackendId> = self.steps.iter().map(|s| s.from).collect();
        out.extend(self.steps.last().map(|s| s.to));
        out
    }
}

type TypedKey = (PrimitiveType, BackendId);
type ConvertKey = (PrimitiveType, BackendId, BackendId);

/// Registry of render backends and of the functions that create, copy and convert
/// their primitive representations.
///
/// A catalog is an ordinary value owned by whatever drives rendering; several catalogs
/// can coexist. Mutation requires `&mut`, so registration can never race with the
/// rendering calls that borrow the catalog shared.
///
/// Duplicate registrations for an existing key are ignored: the first registration
/// wins and the `register_*` call returns `false`.
pub struct BackendCatalog {
    last_id: u32,
    backends: BTreeSet<BackendId>,
    create: BTreeMap<TypedKey, CreateFn>,
    copy: BTreeMap<TypedKey, CopyFn>,
    convert: BTreeMap<ConvertKey, ConvertFn>,
    chains: BTreeMap<ConvertKey, ConvertChain>,
}

impl Default for BackendCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BackendCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendCatalog")
            .field("backends", &self.backends)
            .field("create", &self.create.keys().collect::<Vec<_>>())
            .field("copy", &self.copy.keys().collect::<Vec<_>>())
            .field("convert", &self.convert.keys().collect::<Vec<_>>())
            .field("chains", &self.chains.len())
            .finish()
    }
}

impl BackendCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self {
            last_id: 0,
            backends: BTreeSet::new(),
            create: BTreeMap::new(),
            copy: BTreeMap::new(),
            convert: BTreeMap::new(),
            chains: BTreeMap::new(),
        }
    }

    /// Assign an id to a backend that does not have one yet.
    ///
    /// Idempotent: a non-zero `id` is left untouched. Ids are handed out in increasing
    /// order and are never reused by this catalog.
    pub fn register_backend(&mut self, id: &mut BackendId) -> BackendId {
        if id.is_registered() {
            return *id;
        }
        self.last_id += 1;
        *id = BackendId(self.last_id);
        self.backends.insert(*id);
        tracing::debug!(backend = id.0, "registered backend");
        *id
    }

    /// Forget a backend and every function registered for it, then reset `id` to 0.
    pub fn unregister_backend(&mut self, id: &mut BackendId) {
        let gone = *id;
        *id = BackendId::UNREGISTERED;
        if !self.backends.remove(&gone) {
            return;
        }

        self.create.retain(|&(_, b), _| b != gone);
        self.copy.retain(|&(_, b), _| b != gone);
        let before = self.convert.len();
        self.convert
            .retain(|&(_, from, to), _| from != gone && to != gone);
        if self.convert.len() != before {
            for ty in PrimitiveType::ALL {
                self.rebuild_chains(ty);
            }
        }
        tracing::debug!(backend = gone.0, "unregistered backend");
    }

    /// Return `true` while `id` is registered here.
    pub fn is_registered(&self, id: BackendId) -> bool {
        self.backends.contains(&id)
    }

    /// Number of registered backends.
    pub fn backend_count(&self) -> usize {
        self.backends.len()
    }

    fn accepts(&self, what: &str, backends: &[BackendId]) -> bool {
        if let Some(bad) = backends.iter().find(|b| !self.is_registered(**b)) {
            tracing::warn!(backend = bad.0, "{what} registration names an unregistered backend");
            return false;
        }
        true
    }

    /// Register the factory for `(primitive_type, backend)`.
    pub fn register_create<F>(
        &mut self,
        primitive_type: PrimitiveType,
        backend: BackendId,
        func: F,
    ) -> bool
    where
        F: Fn() -> Primitive + Send + Sync + 'static,
    {
        if !self.accepts("create", &[backend]) {
            return false;
        }
        let key = (primitive_type, backend);
        if self.create.contains_key(&key) {
            tracing::warn!(?primitive_type, backend = backend.0, "duplicate create ignored");
            return false;
        }
        self.create.insert(key, Arc::new(func));
        tracing::debug!(?primitive_type, backend = backend.0, "registered create");
        true
    }

    /// Register the copier for `(primitive_type, backend)`.
    pub fn register_copy<F>(
        &mut self,
        primitive_type: PrimitiveType,
        backend: BackendId,
        func: F,
    ) -> bool
    where
        F: Fn(&Primitive) -> Option<Primitive> + Send + Sync + 'static,
    {
        if !self.accepts("copy", &[backend]) {
            return false;
        }
        let key = (primitive_type, backend);
        if self.copy.contains_key(&key) {
            tracing::warn!(?primitive_type, backend = backend.0, "duplicate copy ignored");
            return false;
        }
        self.copy.insert(key, Arc::new(func));
        tracing::debug!(?primitive_type, backend = backend.0, "registered copy");
        true
    }

    /// Register a converter `from -> to` and recompute the convert chains for the type.
    pub fn register_convert<F>(
        &mut self,
        primitive_type: PrimitiveType,
        from: BackendId,
        to: BackendId,
        func: F,
    ) -> bool
    where
        F: Fn(&Representation) -> Option<Representation> + Send + Sync + 'static,
    {
        if !self.accepts("convert", &[from, to]) {
            return false;
        }
        if from == to {
            tracing::warn!(backend = from.0, "self-conversion ignored");
            return false;
        }
        let key = (primitive_type, from, to);
        if self.convert.contains_key(&key) {
            tracing::warn!(
                ?primitive_type,
                from = from.0,
                to = to.0,
                "duplicate convert ignored"
            );
            return false;
        }
        self.convert.insert(key, Arc::new(func));
        tracing::debug!(?primitive_type, from = from.0, to = to.0, "registered convert");
        self.rebuild_chains(primitive_type);
        true
    }

    /// Return `true` if a factory exists for `(primitive_type, backend)`.
    pub fn has_create(&self, primitive_type: PrimitiveType, backend: BackendId) -> bool {
        self.create.contains_key(&(primitive_type, backend))
    }

    /// Return `true` if a copier exists for `(primitive_type, backend)`.
    pub fn has_copy(&self, primitive_type: PrimitiveType, backend: BackendId) -> bool {
        self.copy.contains_key(&(primitive_type, backend))
    }

    /// Shortest chain `from -> to` for `primitive_type`, if any.
    pub fn convert_chain(
        &self,
        primitive_type: PrimitiveType,
        from: BackendId,
        to: BackendId,
    ) -> Option<&ConvertChain> {
        self.chains.get(&(primitive_type, from, to))
    }

    pub(crate) fn create(
        &self,
        primitive_type: PrimitiveType,
        backend: BackendId,
    ) -> Option<Primitive> {
        self.create
            .get(&(primitive_type, backend))
            .map(|f| f())
    }

    pub(crate) fn copy(
        &self,
        primitive_type: PrimitiveType,
        backend: BackendId,
        primitive: &Primitive,
    ) -> Option<Primitive> {
        self.copy
            .get(&(primitive_type, backend))
            .and_then(|f| f(primitive))
    }

    /// Breadth-first shortest paths from every backend with an outgoing converter.
    ///
    /// Neighbours are explored in ascending id order, so equal-length alternatives always
    /// resolve to the same chain.
    fn rebuild_chains(&mut self, primitive_type: PrimitiveType) {
        self.chains.retain(|&(ty, _, _), _| ty != primitive_type);

        let mut edges: BTreeMap<BackendId, Vec<(BackendId, ConvertFn)>> = BTreeMap::new();
        for (&(ty, from, to), func) in &self.convert {
            if ty == primitive_type {
                edges.entry(from).or_default().push((to, Arc::clone(func)));
            }
        }

        for &start in edges.keys() {
            let mut reached: BTreeMap<BackendId, ConvertStep> = BTreeMap::new();
            let mut queue = VecDeque::from([start]);
            while let Some(node) = queue.pop_front() {
                let Some(out) = edges.get(&node) else {
                    continue;
                };
                for (to, func) in out {
                    if *to == start || reached.contains_key(to) {
                        continue;
                    }
                    reached.insert(
                        *to,
                        ConvertStep {
                            from: node,
                            to: *to,
                            func: Arc::clone(func),
                        },
                    );
                    queue.push_back(*to);
                }
            }

            for &target in reached.keys() {
                let mut steps = Vec::new();
                let mut cursor = target;
                while cursor != start {
                    let Some(step) = reached.get(&cursor) else {
                        break;
                    };
                    steps.push(step.clone());
                    cursor = step.from;
                }
                steps.reverse();
                self.chains
                    .insert((primitive_type, start, target), ConvertChain { steps });
            }
        }

        tracing::trace!(
            ?primitive_type,
            chains = self
                .chains
                .keys()
                .filter(|(ty, _, _)| *ty == primitive_type)
                .count(),
            "rebuilt convert chains"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/primitive/catalog.rs"]
mod tests;
