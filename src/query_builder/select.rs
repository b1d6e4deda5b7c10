use crate::error::SqlCompanionError;
use crate::model::ColumnSpec;

use super::{check_identifier, check_predicate};

/// Assemble `SELECT <cols-or-*> FROM <table> [WHERE <pred>]`.
///
/// Column list items are joined with `", "` preserving input order.
///
/// # Errors
/// Returns `SqlCompanionError::ParameterError` for an empty table name,
/// column name, or predicate.
pub fn build_select(
    table: &str,
    columns: &ColumnSpec,
    predicate: Option<&str>,
) -> Result<String, SqlCompanionError> {
    check_identifier(table, "table name")?;
    match columns {
        ColumnSpec::All => {}
        ColumnSpec::One(name) => check_identifier(name, "column name")?,
        ColumnSpec::Many(names) => {
            for name in names {
                check_identifier(name, "column name")?;
            }
        }
    }

    let mut command = format!("SELECT {} FROM {table}", columns.projection());
    if let Some(predicate) = predicate {
        check_predicate(predicate)?;
        command.push_str(" WHERE ");
        command.push_str(predicate);
    }
    Ok(command)
}
