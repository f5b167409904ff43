//! Scoped Store
//!
//! Hierarchy of [`Scope`] nodes and the dispatch entry points that create them.

pub mod dispatch;
pub mod node;

pub use dispatch::{current_scope, dispatch, dispatch_async};
pub use node::{Ancestors, Scope, ScopeId};
