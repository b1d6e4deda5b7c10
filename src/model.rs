use crate::types::ScalarValue;

/// Projection for a SELECT: everything, one column, or an ordered list.
///
/// `Many` preserves input order, which determines projection order in the
/// generated statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ColumnSpec {
    /// `*`
    #[default]
    All,
    /// A single column name
    One(String),
    /// An ordered sequence of column names
    Many(Vec<String>),
}

impl ColumnSpec {
    /// Render the projection list as it appears in the statement.
    #[must_use]
    pub fn projection(&self) -> String {
        match self {
            ColumnSpec::All => "*".to_string(),
            ColumnSpec::One(name) => name.clone(),
            ColumnSpec::Many(names) => names.join(", "),
        }
    }
}

impl From<&str> for ColumnSpec {
    fn from(name: &str) -> Self {
        ColumnSpec::One(name.to_string())
    }
}

impl From<String> for ColumnSpec {
    fn from(name: String) -> Self {
        ColumnSpec::One(name)
    }
}

impl From<Vec<String>> for ColumnSpec {
    fn from(names: Vec<String>) -> Self {
        ColumnSpec::Many(names)
    }
}

impl From<&[&str]> for ColumnSpec {
    fn from(names: &[&str]) -> Self {
        ColumnSpec::Many(names.iter().map(ToString::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ColumnSpec {
    fn from(names: [&str; N]) -> Self {
        ColumnSpec::Many(names.iter().map(ToString::to_string).collect())
    }
}

/// An ordered column-to-scalar mapping for INSERT and UPDATE.
///
/// Insertion order is preserved and determines generated column order.
/// Setting a column that is already present replaces the earlier value
/// instead of appending a duplicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueRow {
    entries: Vec<(String, ScalarValue)>,
}

impl ValueRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named value, builder style.
    #[must_use]
    pub fn with_value(mut self, column: &str, value: impl Into<ScalarValue>) -> Self {
        self.set(column, value);
        self
    }

    /// Add or replace a named value.
    pub fn set(&mut self, column: &str, value: impl Into<ScalarValue>) {
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| name == column) {
            entry.1 = value;
        } else {
            self.entries.push((column.to_string(), value));
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &ScalarValue> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

/// An assembled statement together with the values bound to its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAndParams {
    pub query: String,
    pub params: Vec<ScalarValue>,
}
