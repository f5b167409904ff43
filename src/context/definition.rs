//! Context definitions
//!
//! A definition is the key under which scopes store a value. Keys are compared by a
//! process-unique [`ContextId`], never by label, so two definitions created with the
//! same label are unrelated slots.

use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-unique identity of a context definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

impl ContextId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        ContextId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx-{}", self.0)
    }
}

struct ContextInner<T> {
    id: ContextId,
    label: String,
    default: Option<T>,
}

/// Definition of a context slot with an optional default value.
///
/// Clones share the same identity: they are the same slot, not new ones.
pub struct Context<T> {
    inner: Arc<ContextInner<T>>,
}

impl<T> Context<T> {
    /// Define a context without a default.
    ///
    /// Reading it outside any dispatched scope is an error; inside a scope that never
    /// bound it, it resolves to `None`.
    pub fn new(label: impl Into<String>) -> Self {
        Self::build(label.into(), None)
    }

    /// Define a context whose value falls back to `default` when nothing binds it
    pub fn with_default(label: impl Into<String>, default: T) -> Self {
        Self::build(label.into(), Some(default))
    }

    fn build(label: String, default: Option<T>) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                id: ContextId::next(),
                label,
                default,
            }),
        }
    }

    pub fn id(&self) -> ContextId {
        self.inner.id
    }

    /// Diagnostic name; never used for lookup
    pub fn label(&self) -> &str {
        &self.inner.label
    }

    pub fn default(&self) -> Option<&T> {
        self.inner.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.inner.default.is_some()
    }
}

impl<T> Clone for Context<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for Context<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl<T> Eq for Context<T> {}

impl<T> fmt::Debug for Context<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("id", &self.inner.id)
            .field("label", &self.inner.label)
            .field("has_default", &self.has_default())
            .finish()
    }
}

/// Definition of a context slot that always resolves to a value.
///
/// Derefs to [`Context`], so it works with every function that takes one, and adds
/// accessors that cannot fail on the read side.
pub struct DefaultContext<T> {
    // Always built with a default; `new` is the only constructor.
    context: Context<T>,
}

impl<T> DefaultContext<T> {
    pub fn new(label: impl Into<String>, default: T) -> Self {
        Self {
            context: Context::with_default(label, default),
        }
    }

    pub fn default_value(&self) -> &T {
        match self.context.default() {
            Some(value) => value,
            None => unreachable!("DefaultContext {} has no default", self.context.label()),
        }
    }

    pub fn as_context(&self) -> &Context<T> {
        &self.context
    }
}

impl<T> Deref for DefaultContext<T> {
    type Target = Context<T>;

    fn deref(&self) -> &Context<T> {
        &self.context
    }
}

impl<T> AsRef<Context<T>> for DefaultContext<T> {
    fn as_ref(&self) -> &Context<T> {
        &self.context
    }
}

impl<T> Clone for DefaultContext<T> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<T> fmt::Debug for DefaultContext<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DefaultContext").field(&self.context).finish()
    }
}

/// Create a fresh context definition without a default
pub fn create_context<T>(label: impl Into<String>) -> Context<T> {
    Context::new(label)
}

/// Create a fresh context definition with a guaranteed default
pub fn create_context_with_default<T>(label: impl Into<String>, default: T) -> DefaultContext<T> {
    DefaultContext::new(label, default)
}
