//! Scope Propagator
//!
//! Holds the ambient [`Scope`] for the current flow of execution. The handle lives in a
//! tokio task-local, so it is carried per future across every suspension point and is
//! swapped in and out as sibling futures are polled on the same worker. Synchronous code
//! sees the handle installed by the closest enclosing [`run_with_ambient`] or
//! [`run_with_ambient_async`] call.
//!
//! This is the only module that touches the task-local primitive.

use crate::scope::Scope;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;

tokio::task_local! {
    static AMBIENT: Arc<Scope>;
}

/// Run `f` with `handle` as the ambient scope for the duration of the call.
///
/// Nested calls install their own handle and restore the enclosing one when they
/// return, including when `f` panics.
pub fn run_with_ambient<F, R>(handle: Arc<Scope>, f: F) -> R
where
    F: FnOnce() -> R,
{
    AMBIENT.sync_scope(handle, f)
}

/// Run `fut` with `handle` as the ambient scope on every poll.
pub fn run_with_ambient_async<F>(handle: Arc<Scope>, fut: F) -> impl Future<Output = F::Output>
where
    F: Future,
{
    AMBIENT.scope(handle, fut)
}

/// The ambient scope visible at the call site, if any.
pub fn current_ambient() -> Option<Arc<Scope>> {
    AMBIENT.try_with(Arc::clone).ok()
}

/// Bind the caller's ambient scope (if any) into `fut`.
///
/// Use this when handing a future to an executor that does not run it inline, so the
/// continuation still observes the scope it was scheduled from.
pub fn propagate<F>(fut: F) -> futures::future::Either<impl Future<Output = F::Output>, F>
where
    F: Future,
{
    match current_ambient() {
        Some(handle) => futures::future::Either::Left(AMBIENT.scope(handle, fut)),
        None => futures::future::Either::Right(fut),
    }
}

/// Spawn `fut` on the tokio runtime, carrying the caller's ambient scope into the task.
///
/// The spawned task shares the caller's scope node; it does not open a new one. Wrap
/// the future in [`crate::dispatch_async`] first to give the task its own child scope.
pub fn spawn<F>(fut: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::spawn(propagate(fut))
}

/// Capture the caller's ambient scope (if any) into a closure that can run elsewhere,
/// such as on a `std::thread` or via `tokio::task::spawn_blocking`.
pub fn bind<F, R>(f: F) -> impl FnOnce() -> R
where
    F: FnOnce() -> R,
{
    let handle = current_ambient();
    move || match handle {
        Some(handle) => run_with_ambient(handle, f),
        None => f(),
    }
}
