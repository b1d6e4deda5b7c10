use std::collections::HashMap;
use std::sync::Arc;

use crate::types::RowValues;

/// A single row from a query result, with access by column name or index.
#[derive(Debug, Clone)]
pub struct DbRow {
    /// Column names, shared across all rows in a result set
    pub column_names: Arc<Vec<String>>,
    /// The values for this row, in projection order
    pub values: Vec<RowValues>,
    // Shared name-to-index map so lookups skip repeated string comparisons.
    pub(crate) column_index: Arc<HashMap<String, usize>>,
}

impl DbRow {
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<RowValues>) -> Self {
        let column_index = Arc::new(build_column_index(&column_names));
        Self {
            column_names,
            values,
            column_index,
        }
    }

    /// Index of a column by name, or `None` if absent.
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        if let Some(&idx) = self.column_index.get(column_name) {
            return Some(idx);
        }
        self.column_names.iter().position(|col| col == column_name)
    }

    /// Value at a column by name, or `None` if the column is absent.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Value at a column index, or `None` if out of bounds.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.values.get(index)
    }
}

pub(crate) fn build_column_index(column_names: &[String]) -> HashMap<String, usize> {
    column_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}
