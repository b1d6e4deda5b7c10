use crate::error::SqlCompanionError;
use crate::model::{QueryAndParams, ValueRow};

use super::{check_identifier, check_predicate};

/// Assemble `INSERT INTO <table> (c1, c2, ...) VALUES (?1, ?2, ...)` with the
/// row's values bound in mapping order.
///
/// # Errors
/// Returns `SqlCompanionError::ParameterError` for an empty table name, an
/// empty row, or an empty column name.
pub fn build_insert(table: &str, row: &ValueRow) -> Result<QueryAndParams, SqlCompanionError> {
    check_identifier(table, "table name")?;
    if row.is_empty() {
        return Err(SqlCompanionError::ParameterError(
            "INSERT requires at least one column/value pair".to_string(),
        ));
    }

    let mut columns = Vec::with_capacity(row.len());
    let mut placeholders = Vec::with_capacity(row.len());
    for (idx, column) in row.columns().enumerate() {
        check_identifier(column, "column name")?;
        columns.push(column);
        placeholders.push(format!("?{}", idx + 1));
    }

    Ok(QueryAndParams {
        query: format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            columns.join(", "),
            placeholders.join(", ")
        ),
        params: row.values().cloned().collect(),
    })
}

/// Assemble `UPDATE <table> SET c1 = ?1, c2 = ?2, ... [WHERE <pred>]`.
///
/// Update values are constrained to the same scalar set as insert.
///
/// # Errors
/// Returns `SqlCompanionError::ParameterError` for an empty table name, an
/// empty row, an empty column name, or an empty predicate.
pub fn build_update(
    table: &str,
    row: &ValueRow,
    predicate: Option<&str>,
) -> Result<QueryAndParams, SqlCompanionError> {
    check_identifier(table, "table name")?;
    if row.is_empty() {
        return Err(SqlCompanionError::ParameterError(
            "UPDATE requires at least one column/value pair".to_string(),
        ));
    }

    let mut assignments = Vec::with_capacity(row.len());
    for (idx, column) in row.columns().enumerate() {
        check_identifier(column, "column name")?;
        assignments.push(format!("{column} = ?{}", idx + 1));
    }

    let mut query = format!("UPDATE {table} SET {}", assignments.join(", "));
    if let Some(predicate) = predicate {
        check_predicate(predicate)?;
        query.push_str(" WHERE ");
        query.push_str(predicate);
    }

    Ok(QueryAndParams {
        query,
        params: row.values().cloned().collect(),
    })
}

/// Assemble `DELETE FROM <table> [WHERE <pred>]`.
///
/// With no predicate this clears the whole table.
///
/// # Errors
/// Returns `SqlCompanionError::ParameterError` for an empty table name or an
/// empty predicate.
pub fn build_delete(table: &str, predicate: Option<&str>) -> Result<String, SqlCompanionError> {
    check_identifier(table, "table name")?;
    let mut query = format!("DELETE FROM {table}");
    if let Some(predicate) = predicate {
        check_predicate(predicate)?;
        query.push_str(" WHERE ");
        query.push_str(predicate);
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScalarValue;

    #[test]
    fn insert_binds_values_in_mapping_order() {
        let row = ValueRow::new().with_value("name", "John").with_value("age", 34);
        let qp = build_insert("people", &row).unwrap();
        assert_eq!(qp.query, "INSERT INTO people (name, age) VALUES (?1, ?2)");
        assert_eq!(
            qp.params,
            vec![ScalarValue::Text("John".into()), ScalarValue::Int(34)]
        );
    }

    #[test]
    fn insert_rejects_empty_row() {
        assert!(build_insert("people", &ValueRow::new()).is_err());
    }

    #[test]
    fn update_with_predicate() {
        let row = ValueRow::new().with_value("name", "Poul").with_value("age", 35);
        let qp = build_update("people", &row, Some("name = 'Tomas'")).unwrap();
        assert_eq!(
            qp.query,
            "UPDATE people SET name = ?1, age = ?2 WHERE name = 'Tomas'"
        );
        assert_eq!(qp.params.len(), 2);
    }

    #[test]
    fn update_without_predicate_touches_every_row() {
        let row = ValueRow::new().with_value("age", 0);
        let qp = build_update("people", &row, None).unwrap();
        assert_eq!(qp.query, "UPDATE people SET age = ?1");
    }

    #[test]
    fn delete_requires_nonempty_predicate_when_given() {
        assert_eq!(
            build_delete("people", Some("age < 18")).unwrap(),
            "DELETE FROM people WHERE age < 18"
        );
        assert_eq!(build_delete("people", None).unwrap(), "DELETE FROM people");
        assert!(build_delete("people", Some("  ")).is_err());
    }
}
