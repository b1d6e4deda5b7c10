//! Statement assembly from structured inputs.
//!
//! Caller data (row values) is always bound through placeholders; raw text
//! reaches the statement only through trusted fragments: table names, column
//! definitions, and predicates.

mod ddl;
mod dml;
mod select;

pub use ddl::build_create_table;
pub use dml::{build_delete, build_insert, build_update};
pub use select::build_select;

use crate::error::SqlCompanionError;

/// Table and column names are caller-trusted and not escaped, but an empty
/// identifier is always a mistake.
pub(crate) fn check_identifier(name: &str, what: &str) -> Result<(), SqlCompanionError> {
    if name.trim().is_empty() {
        return Err(SqlCompanionError::ParameterError(format!(
            "{what} must be a non-empty string"
        )));
    }
    Ok(())
}

/// Predicates are raw boolean SQL fragments; only emptiness is rejected.
pub(crate) fn check_predicate(predicate: &str) -> Result<(), SqlCompanionError> {
    if predicate.trim().is_empty() {
        return Err(SqlCompanionError::ParameterError(
            "WHERE predicate must be a non-empty string".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifier_is_rejected() {
        assert!(check_identifier("people", "table name").is_ok());
        assert!(check_identifier("", "table name").is_err());
        assert!(check_identifier("   ", "column name").is_err());
    }

    #[test]
    fn empty_predicate_is_rejected() {
        assert!(check_predicate("age > 18").is_ok());
        assert!(check_predicate(" ").is_err());
    }
}
