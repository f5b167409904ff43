//! Scope nodes
//!
//! A [`Scope`] owns the context values bound while it was the ambient scope and points
//! at the scope that was ambient when it was created. Lookups walk that parent chain
//! from the node outward, so a value bound in an outer scope is visible to every inner
//! scope until one of them binds its own.

use crate::context::{Context, ContextId};
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

type Binding = Arc<dyn Any + Send + Sync>;

/// Process-unique scope identifier, used for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u64);

impl ScopeId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        ScopeId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope-{}", self.0)
    }
}

/// One level of the scope hierarchy.
///
/// The parent link is fixed at creation. Bindings are only written through the
/// context write operations, which always target the ambient scope of the calling flow.
/// A scope handle obtained from outside cannot be written to directly:
///
/// ```compile_fail
/// let ctx = tether::Context::<u8>::new("pinned");
/// let scope = tether::Scope::root();
/// scope.set(&ctx, 1);
/// ```
pub struct Scope {
    id: ScopeId,
    depth: usize,
    parent: Option<Arc<Scope>>,
    bindings: RwLock<HashMap<ContextId, Binding>>,
}

impl Scope {
    /// Create a scope with no parent
    pub fn root() -> Arc<Self> {
        Arc::new(Scope {
            id: ScopeId::next(),
            depth: 0,
            parent: None,
            bindings: RwLock::new(HashMap::new()),
        })
    }

    /// Create a child scope of `self`
    pub fn child(self: &Arc<Self>) -> Arc<Self> {
        Arc::new(Scope {
            id: ScopeId::next(),
            depth: self.depth + 1,
            parent: Some(Arc::clone(self)),
            bindings: RwLock::new(HashMap::new()),
        })
    }

    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Number of ancestors between this scope and its root (root = 0)
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent(&self) -> Option<&Arc<Scope>> {
        self.parent.as_ref()
    }

    /// Iterate this scope and its ancestors, nearest first
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Whether this scope itself (ignoring ancestors) binds `context`
    pub fn contains_local<T>(&self, context: &Context<T>) -> bool {
        self.bindings.read().contains_key(&context.id())
    }

    /// Number of contexts bound directly in this scope
    pub fn local_len(&self) -> usize {
        self.bindings.read().len()
    }

    /// Nearest binding for `context`, walking from this scope through its ancestors.
    ///
    /// Stops at the first scope that binds the context; does not consult the default.
    pub fn lookup<T>(&self, context: &Context<T>) -> Option<T>
    where
        T: Clone + 'static,
    {
        let key = context.id();
        self.ancestors().find_map(|scope| {
            scope
                .bindings
                .read()
                .get(&key)
                .and_then(|value| value.downcast_ref::<T>())
                .cloned()
        })
    }

    /// Resolved value for `context`: the nearest binding, else the declared default
    pub fn get<T>(&self, context: &Context<T>) -> Option<T>
    where
        T: Clone + 'static,
    {
        self.lookup(context).or_else(|| context.default().cloned())
    }

    /// Bind `value` for `context` in this scope, replacing any previous local binding.
    /// Ancestors are never touched. Only reachable through the context write functions,
    /// which pass the ambient scope of the calling flow.
    pub(crate) fn set<T>(&self, context: &Context<T>, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.bindings.write().insert(context.id(), Arc::new(value));
    }
}

impl Drop for Scope {
    // Unlink the chain iteratively; the default drop glue recurses once per ancestor.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(parent) = next {
            next = Arc::into_inner(parent).and_then(|mut scope| scope.parent.take());
        }
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("id", &self.id)
            .field("depth", &self.depth)
            .field("parent", &self.parent.as_ref().map(|p| p.id))
            .field("bindings", &self.local_len())
            .finish()
    }
}

/// Iterator over a scope and its ancestors, see [`Scope::ancestors`]
pub struct Ancestors<'a> {
    next: Option<&'a Scope>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Scope;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}
