//! Dispatch: entry points that open a new scope for a unit of work.

use crate::propagator;
use crate::scope::Scope;
use std::future::Future;
use std::sync::Arc;
use tracing::trace;

/// Create a scope chained to the ambient one, or a root scope outside any extent.
fn open_scope() -> Arc<Scope> {
    let scope = match propagator::current_ambient() {
        Some(parent) => parent.child(),
        None => Scope::root(),
    };
    trace!(
        scope = %scope.id(),
        parent = ?scope.parent().map(|p| p.id().as_u64()),
        depth = scope.depth(),
        "Dispatching scope"
    );
    scope
}

/// Run `f` inside a new scope.
///
/// The new scope's parent is the scope ambient at the call site, so `f` inherits every
/// value bound there and anything `f` binds stays invisible to the caller and to
/// sibling dispatches. Called outside any scope, `f` runs in a fresh root scope.
///
/// ```
/// use tether::{create_context, dispatch, use_context, with_context};
///
/// let user = create_context::<String>("user");
///
/// let seen = dispatch(|| {
///     with_context(&user, "ada".to_string()).unwrap();
///     dispatch(|| use_context(&user).unwrap())
/// });
/// assert_eq!(seen.as_deref(), Some("ada"));
/// ```
pub fn dispatch<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    propagator::run_with_ambient(open_scope(), f)
}

/// Run `fut` inside a new scope.
///
/// The parent is captured when `dispatch_async` is called, not when the future is
/// first polled, so the returned future can be handed to [`propagator::spawn`] or
/// `tokio::spawn` and still chain to the caller's scope.
pub fn dispatch_async<F>(fut: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    propagator::run_with_ambient_async(open_scope(), fut)
}

/// The scope ambient at the call site, if any
pub fn current_scope() -> Option<Arc<Scope>> {
    propagator::current_ambient()
}
