//! Statement builders that render contexts into [`Statement`]s.
//!
//! Each builder borrows a dialect and a context, walks the context
//! once, and produces text and bind arguments in one pass through a
//! [`StatementBuffer`](crate::statement::StatementBuffer).
//!
//! [`Statement`]: crate::statement::Statement

mod alias;
mod delete;
mod insert;
mod schema;
mod select;
mod set_operation;
mod support;
mod template;
mod update;

pub use alias::AliasManager;
pub use delete::DeleteStatementBuilder;
pub use insert::InsertStatementBuilder;
pub use schema::SchemaStatementBuilder;
pub use select::SelectStatementBuilder;
pub use set_operation::SetOperationStatementBuilder;
pub use template::{ScriptStatementBuilder, TemplateStatementBuilder};
pub use update::UpdateStatementBuilder;
