//! Convenience query layer over `rusqlite`.
//!
//! One [`Database`](connection::Database) owns one SQLite connection and a
//! file-backed [`EventLog`](logging::EventLog). High-level operations
//! (select, insert, update, delete, create-table, raw execute) validate
//! their structured inputs, assemble a statement, execute it in auto-commit
//! mode, and append the outcome to the log.
//!
//! Caller data always travels through bound placeholders; raw SQL text is
//! accepted only for trusted fragments: table names, column definitions, and
//! `WHERE` predicates.

mod connection;
mod error;
mod executor;
mod logging;
mod model;
mod params;
mod query_builder;
mod results;
mod types;

pub mod prelude;

pub use connection::Database;
pub use error::SqlCompanionError;
pub use logging::EventLog;
pub use model::{ColumnSpec, QueryAndParams, ValueRow};
pub use results::{DbRow, ResultSet};
pub use types::{RowValues, ScalarValue};

pub use executor::{build_result_set, extract_value};
pub use params::convert_params;
pub use query_builder::{
    build_create_table, build_delete, build_insert, build_select, build_update,
};
