//! Tether: Implicit Scoped Context
//!
//! Typed context values that follow a logical flow of execution instead of a thread.
//! A value bound inside a dispatched scope is visible to everything that scope runs,
//! synchronously or across `.await` points, and to every scope dispatched from it,
//! while sibling scopes stay isolated from each other.
//!
//! ```
//! use tether::{create_context, create_context_with_default, dispatch, use_context, with_context};
//!
//! let factor = create_context_with_default("factor", 2);
//! let value = create_context::<i32>("value");
//!
//! let result = dispatch(|| {
//!     with_context(&value, 2).unwrap();
//!     let inner = dispatch(|| use_context(&value).unwrap().unwrap());
//!     factor.get() * inner
//! });
//! assert_eq!(result, 4);
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod propagator;
pub mod scope;

pub use context::{
    create_context, create_context_with_default, update_context, use_context, with_context,
    Context, ContextId, DefaultContext,
};
pub use error::ContextError;
pub use scope::{current_scope, dispatch, dispatch_async, Scope, ScopeId};
