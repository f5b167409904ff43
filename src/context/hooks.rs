//! Reading and writing context values in the ambient scope.
//!
//! Applications usually wrap these in small domain helpers so call sites never name
//! the definition directly:
//!
//! ```
//! use std::sync::LazyLock;
//! use tether::{create_context_with_default, dispatch, DefaultContext};
//!
//! static REQUEST_ID: LazyLock<DefaultContext<String>> =
//!     LazyLock::new(|| create_context_with_default("request_id", "-".to_string()));
//!
//! fn with_request_id(id: &str) -> Result<(), tether::ContextError> {
//!     REQUEST_ID.set(id.to_string())
//! }
//!
//! fn use_request_id() -> String {
//!     REQUEST_ID.get()
//! }
//!
//! assert_eq!(use_request_id(), "-");
//! dispatch(|| {
//!     with_request_id("req-42").unwrap();
//!     assert_eq!(use_request_id(), "req-42");
//! });
//! ```

use crate::context::{Context, DefaultContext};
use crate::error::ContextError;
use crate::propagator;
use crate::scope::Scope;
use std::sync::Arc;
use tracing::{debug, trace};

fn active_scope<T>(context: &Context<T>) -> Result<Arc<Scope>, ContextError> {
    propagator::current_ambient().ok_or_else(|| {
        debug!(context = context.label(), "Context write outside any scope");
        ContextError::NoActiveScope {
            context: context.label().to_string(),
        }
    })
}

fn store_binding<T>(scope: &Scope, context: &Context<T>, value: T)
where
    T: Send + Sync + 'static,
{
    scope.set(context, value);
    trace!(
        context = context.label(),
        context_id = %context.id(),
        scope = %scope.id(),
        "Bound context value"
    );
}

/// Bind `value` for `context` in the ambient scope.
///
/// Replaces any value this scope bound before; ancestors keep theirs. The new value is
/// seen by later reads in this scope and in scopes dispatched from it afterwards.
pub fn with_context<T>(context: &Context<T>, value: T) -> Result<(), ContextError>
where
    T: Send + Sync + 'static,
{
    let scope = active_scope(context)?;
    store_binding(&scope, context, value);
    Ok(())
}

/// Derive a new value from the currently resolved one and bind it in the ambient scope.
///
/// `f` receives what [`use_context`] would return at this point (`None` only when
/// nothing binds the context and it has no default).
pub fn update_context<T, F>(context: &Context<T>, f: F) -> Result<(), ContextError>
where
    T: Clone + Send + Sync + 'static,
    F: FnOnce(Option<T>) -> T,
{
    let scope = active_scope(context)?;
    let next = f(scope.get(context));
    store_binding(&scope, context, next);
    Ok(())
}

/// Resolve `context` from the ambient scope chain.
///
/// Outside any scope, the default is returned if one was declared and
/// [`ContextError::NoActiveScopeNoDefault`] otherwise. Inside a scope, the nearest
/// binding wins, then the default, then `None`.
pub fn use_context<T>(context: &Context<T>) -> Result<Option<T>, ContextError>
where
    T: Clone + 'static,
{
    match propagator::current_ambient() {
        Some(scope) => Ok(scope.get(context)),
        None if context.has_default() => Ok(context.default().cloned()),
        None => {
            debug!(
                context = context.label(),
                "Context read outside any scope without a default"
            );
            Err(ContextError::NoActiveScopeNoDefault {
                context: context.label().to_string(),
            })
        }
    }
}

impl<T> DefaultContext<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Resolve the value; falls back to the default whether or not a scope is active
    pub fn get(&self) -> T {
        propagator::current_ambient()
            .and_then(|scope| scope.lookup(self.as_context()))
            .unwrap_or_else(|| T::clone(self.default_value()))
    }

    /// Bind `value` in the ambient scope, see [`with_context`]
    pub fn set(&self, value: T) -> Result<(), ContextError> {
        with_context(self.as_context(), value)
    }

    /// Derive and bind a new value from the resolved one, see [`update_context`]
    pub fn update<F>(&self, f: F) -> Result<(), ContextError>
    where
        F: FnOnce(T) -> T,
    {
        update_context(self.as_context(), |current| {
            f(current.unwrap_or_else(|| T::clone(self.default_value())))
        })
    }
}
