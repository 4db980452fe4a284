//! Immutable query contexts accumulated by the DSL.
//!
//! Every mutator clones the context, updates one field, and returns the
//! new value, so a partially built query can be shared and branched
//! freely.

mod delete;
mod insert;
mod schema;
mod select;
mod set_operation;
mod template;
mod update;

pub use delete::DeleteContext;
pub use insert::{DuplicateKeyType, InsertContext, UpsertContext};
pub use schema::SchemaContext;
pub use select::{Join, JoinKind, Projection, SelectContext};
pub use set_operation::{SetOperationComponent, SetOperationContext, SetOperationKind};
pub use template::{ScriptContext, TemplateContext};
pub use update::UpdateContext;
