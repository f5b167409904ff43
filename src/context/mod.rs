//! Context definitions and the operations that read and write them.

pub mod definition;
pub mod hooks;

pub use definition::{
    create_context, create_context_with_default, Context, ContextId, DefaultContext,
};
pub use hooks::{update_context, use_context, with_context};
