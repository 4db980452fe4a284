//! # ferric-sql-mariadb
//!
//! MariaDB-specific extensions for `ferric-sql-core`.
//!
//! # How MariaDB differs from other dialects
//!
//! - **Identifier quoting**: MariaDB quotes identifiers with backticks
//!   (`` ` ``) rather than the standard double quotes.
//! - **Paging**: MariaDB uses `limit {n} offset {n}`. An offset cannot
//!   appear without a limit, so offset-only queries carry the catch-all
//!   limit from the [LIMIT documentation].
//! - **[UPSERT]**: `INSERT … ON DUPLICATE KEY UPDATE` refreshes
//!   conflicting rows with `c = values(c)` assignments, and
//!   `INSERT IGNORE` drops them.
//! - **[Sequences]**: supported since MariaDB 10.3.
//! - **Introspection**: table existence, column names, and index names
//!   come from `information_schema` queries in the
//!   [`introspection`] module.
//!
//! [LIMIT documentation]: https://mariadb.com/kb/en/limit/
//! [UPSERT]: https://mariadb.com/kb/en/insert-on-duplicate-key-update/
//! [Sequences]: https://mariadb.com/kb/en/create-sequence/
//!
//! ## Example
//!
//! ```rust
//! use ferric_sql_core::dialect::Dialect;
//! use ferric_sql_core::dsl;
//! use ferric_sql_core::metamodel::{integer, varchar, EntityMetamodel};
//! use ferric_sql_mariadb::MariaDbDialect;
//!
//! let mut builder = EntityMetamodel::builder("User");
//! let id = builder.column(integer("id").id());
//! let name = builder.column(varchar("name", 50));
//! let user = builder.build();
//!
//! let context = dsl::insert(&user)
//!     .values(|v| {
//!         v.set(&id, 1);
//!         v.set(&name, "Alice");
//!     })
//!     .on_duplicate_key_update(&[]);
//! let statement = MariaDbDialect::new().upsert_statement(&context).unwrap();
//! assert_eq!(
//!     statement.to_sql(),
//!     "insert into `user` (id, name) values (?, ?) \
//!      on duplicate key update name = values(name)"
//! );
//! ```

pub mod introspection;

mod dialect;
mod upsert;

pub use dialect::MariaDbDialect;
pub use upsert::UpsertStatementBuilder;
