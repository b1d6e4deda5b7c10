//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types to make it easier to
//! get started with the library.

pub use crate::connection::Database;
pub use crate::error::SqlCompanionError;
pub use crate::logging::EventLog;
pub use crate::model::{ColumnSpec, QueryAndParams, ValueRow};
pub use crate::results::{DbRow, ResultSet};
pub use crate::types::{RowValues, ScalarValue};
