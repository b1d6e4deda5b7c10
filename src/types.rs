/// A scalar acceptable as a column value in INSERT and UPDATE statements.
///
/// The set is closed on purpose: anything outside {text, integer, float} is
/// unrepresentable, so value-kind validation happens at compile time instead
/// of inside each operation:
/// ```rust
/// use sqlite_companion::prelude::*;
///
/// let row = ValueRow::new()
///     .with_value("name", "John")
///     .with_value("age", 34)
///     .with_value("balance", 2300.85);
/// # let _ = row;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// Text/string value
    Text(String),
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Text(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Text(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int(value)
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        ScalarValue::Int(i64::from(value))
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Float(value)
    }
}

/// Values that come back from a query result.
///
/// Wider than [`ScalarValue`] because SQLite can hand back NULLs and blobs
/// regardless of what this crate ever writes.
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// NULL value
    Null,
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValues::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }
}
