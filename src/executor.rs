use rusqlite::types::Value;
use rusqlite::{Connection, Statement, ToSql};

use crate::error::SqlCompanionError;
use crate::params::convert_params;
use crate::results::ResultSet;
use crate::types::{RowValues, ScalarValue};

/// Extract a [`RowValues`] from a SQLite row.
///
/// # Errors
/// Returns `SqlCompanionError::SqliteError` if the value cannot be read.
pub fn extract_value(row: &rusqlite::Row, idx: usize) -> Result<RowValues, SqlCompanionError> {
    let value: Value = row.get(idx).map_err(SqlCompanionError::SqliteError)?;
    match value {
        Value::Null => Ok(RowValues::Null),
        Value::Integer(i) => Ok(RowValues::Int(i)),
        Value::Real(f) => Ok(RowValues::Float(f)),
        Value::Text(s) => Ok(RowValues::Text(s)),
        Value::Blob(b) => Ok(RowValues::Blob(b)),
    }
}

/// Run a prepared statement and materialize every row into a [`ResultSet`].
///
/// Column order follows the statement's projection order.
///
/// # Errors
/// Returns `SqlCompanionError` if execution or value extraction fails.
pub fn build_result_set(
    stmt: &mut Statement,
    params: &[Value],
) -> Result<ResultSet, SqlCompanionError> {
    let param_refs: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();
    let col_count = column_names.len();
    let column_names_rc = std::sync::Arc::new(column_names);

    let mut rows_iter = stmt.query(&param_refs[..])?;
    let mut result_set = ResultSet::with_capacity(10);
    result_set.set_column_names(column_names_rc);

    while let Some(row) = rows_iter.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(extract_value(row, i)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}

/// Prepare and run a SELECT, returning the full result set.
///
/// # Errors
/// Returns `SqlCompanionError` if preparation or execution fails.
pub fn run_select(
    conn: &Connection,
    query: &str,
    params: &[ScalarValue],
) -> Result<ResultSet, SqlCompanionError> {
    let converted = convert_params(params);
    let mut stmt = conn.prepare(query).map_err(SqlCompanionError::SqliteError)?;
    build_result_set(&mut stmt, &converted)
}

/// Prepare and run a DML statement, returning rows affected.
///
/// The connection stays in auto-commit mode, so the statement is durable as
/// soon as this returns.
///
/// # Errors
/// Returns `SqlCompanionError` if preparation or execution fails.
pub fn run_dml(
    conn: &Connection,
    query: &str,
    params: &[ScalarValue],
) -> Result<usize, SqlCompanionError> {
    let converted = convert_params(params);
    let mut stmt = conn.prepare(query).map_err(SqlCompanionError::SqliteError)?;
    let refs: Vec<&dyn ToSql> = converted.iter().map(|v| v as &dyn ToSql).collect();
    let affected = stmt
        .execute(&refs[..])
        .map_err(SqlCompanionError::SqliteError)?;
    Ok(affected)
}
