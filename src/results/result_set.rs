use std::collections::HashMap;
use std::sync::Arc;

use super::row::{DbRow, build_column_index};
use crate::types::RowValues;

/// An ordered materialized result from a query.
///
/// Rows share one `Arc` of column names; `rows_affected` doubles as the row
/// count for SELECTs.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query, in statement order
    pub results: Vec<DbRow>,
    /// The number of rows returned (SELECT) or affected (DML)
    pub rows_affected: usize,
    column_names: Option<Arc<Vec<String>>>,
    column_index: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    /// Create a result set with preallocated row capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            rows_affected: 0,
            column_names: None,
            column_index: None,
        }
    }

    /// Set the column names shared by all rows of this result set.
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index = Some(Arc::new(build_column_index(&column_names)));
        self.column_names = Some(column_names);
    }

    #[must_use]
    pub fn get_column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Append a row of values; a no-op until column names are set.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        let (Some(column_names), Some(column_index)) = (&self.column_names, &self.column_index)
        else {
            return;
        };
        self.results.push(DbRow {
            column_names: Arc::clone(column_names),
            values: row_values,
            column_index: Arc::clone(column_index),
        });
        self.rows_affected += 1;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }
}
