//! # ferric-sql-sqlite
//!
//! SQLite-specific extensions for `ferric-sql-core`.
//!
//! # How SQLite differs from other dialects
//!
//! - **Identifier quoting**: SQLite accepts the standard double quotes,
//!   so the default quoting applies.
//! - **Integer affinity**: integer columns are 64-bit regardless of the
//!   declared width, and [AUTOINCREMENT] requires an `integer` primary
//!   key, so both integer types map to `integer`.
//! - **Paging**: SQLite uses `limit {n} offset {n}`. An offset cannot
//!   appear without a limit, so offset-only queries carry `limit -1`,
//!   which the [LIMIT documentation] defines as unbounded.
//! - **[UPSERT]**: `INSERT … ON CONFLICT (keys) DO UPDATE SET` refreshes
//!   conflicting rows with `c = excluded.c` assignments, and
//!   `DO NOTHING` drops them.
//! - **Sequences**: not supported; describing one raises a capability
//!   error.
//! - **Indexes**: table definitions cannot embed index clauses, so each
//!   index becomes a separate `create index` statement.
//!
//! [AUTOINCREMENT]: https://www.sqlite.org/autoinc.html
//! [LIMIT documentation]: https://www.sqlite.org/lang_select.html#limitoffset
//! [UPSERT]: https://www.sqlite.org/lang_upsert.html
//!
//! ## Example
//!
//! ```rust
//! use ferric_sql_core::dialect::Dialect;
//! use ferric_sql_core::dsl;
//! use ferric_sql_core::metamodel::{integer, varchar, EntityMetamodel};
//! use ferric_sql_sqlite::SqliteDialect;
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
//! let statement = SqliteDialect::new().upsert_statement(&context).unwrap();
//! assert_eq!(
//!     statement.to_sql(),
//!     "insert into \"user\" (id, name) values (?, ?) \
//!      on conflict (id) do update set name = excluded.name"
//! );
//! ```

mod dialect;
mod upsert;

pub use dialect::SqliteDialect;
pub use upsert::UpsertStatementBuilder;
