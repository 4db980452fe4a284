//! # ferric-sql-core
//!
//! A type-safe SQL statement builder driven by entity metamodels.
//!
//! This crate provides:
//! - Entity metamodels that describe tables once and hand out typed
//!   column handles
//! - Query contexts assembled through a small DSL, independent of any
//!   database dialect
//! - Statement builders that render a context into parameterized SQL
//!   for a chosen dialect
//!
//! ## Building statements
//!
//! A context describes the query; a dialect renders it. Bind arguments
//! always travel as placeholders, never as inlined text:
//!
//! ```rust
//! use ferric_sql_core::builder::SelectStatementBuilder;
//! use ferric_sql_core::dialect::GenericDialect;
//! use ferric_sql_core::dsl;
//! use ferric_sql_core::metamodel::{integer, varchar, EntityMetamodel};
//!
//! let mut builder = EntityMetamodel::builder("Employee");
//! let id = builder.column(integer("id").id());
//! let name = builder.column(varchar("name", 50));
//! let employee = builder.build();
//!
//! let context = dsl::from(&employee).where_by(|w| {
//!     w.eq(&name, "Alice");
//!     w.greater(&id, 100);
//! });
//! let statement = SelectStatementBuilder::new(&GenericDialect, &context).build();
//!
//! assert_eq!(
//!     statement.to_sql(),
//!     r#"select t0_.id, t0_.name from "employee" t0_ where t0_.name = ? and t0_.id > ?"#
//! );
//! ```
//!
//! ## Masked debug SQL
//!
//! Statements render a debug form with arguments inlined. Columns
//! declared `masked()` hide their values there, so logs never leak
//! credentials:
//!
//! ```rust
//! use ferric_sql_core::builder::UpdateStatementBuilder;
//! use ferric_sql_core::dialect::GenericDialect;
//! use ferric_sql_core::dsl;
//! use ferric_sql_core::metamodel::{integer, varchar, EntityMetamodel};
//!
//! let mut builder = EntityMetamodel::builder("User");
//! let id = builder.column(integer("id").id());
//! let password = builder.column(varchar("password", 100).masked());
//! let user = builder.build();
//!
//! let context = dsl::update(&user)
//!     .set(|s| s.set(&password, "s3cr3t"))
//!     .where_by(|w| w.eq(&id, 1));
//! let statement = UpdateStatementBuilder::new(&GenericDialect, &context).build();
//!
//! assert_eq!(
//!     statement.to_debug_sql(),
//!     r#"update "user" t0_ set t0_.password = ***** where t0_.id = 1"#
//! );
//! ```

pub mod builder;
pub mod context;
pub mod dialect;
pub mod dsl;
pub mod error;
pub mod expr;
pub mod metamodel;
pub mod statement;
pub mod value;

pub use dialect::{Dialect, GenericDialect};
pub use error::{Result, SqlError};
pub use expr::{Aggregate, ColumnExpression, Criterion, Operand, SortItem, SortOrder};
pub use metamodel::{Column, ColumnRef, ColumnType, EntityMetamodel, PropertyDef};
pub use statement::{BoundValue, Statement, StatementBuffer, StatementPart};
pub use value::{SqlValue, ToSqlValue};
