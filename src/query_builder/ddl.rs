use crate::error::SqlCompanionError;

use super::check_identifier;

/// Assemble `CREATE TABLE IF NOT EXISTS <table> (...)` from raw column
/// definition fragments plus an optional trailing constraint fragment.
///
/// Fragments are trusted schema text (e.g. `"id INTEGER PRIMARY KEY"`) and
/// are inserted verbatim, one per line. `IF NOT EXISTS` makes the statement
/// idempotent at the SQL level.
///
/// # Errors
/// Returns `SqlCompanionError::ParameterError` for an empty table name, an
/// empty column list, or a blank fragment.
pub fn build_create_table(
    table: &str,
    columns: &[&str],
    constraint: Option<&str>,
) -> Result<String, SqlCompanionError> {
    check_identifier(table, "table name")?;
    if columns.is_empty() {
        return Err(SqlCompanionError::ParameterError(
            "CREATE TABLE requires at least one column definition".to_string(),
        ));
    }

    let mut fragments = Vec::with_capacity(columns.len() + 1);
    for column in columns {
        check_identifier(column, "column definition")?;
        fragments.push(*column);
    }
    if let Some(constraint) = constraint {
        check_identifier(constraint, "constraint fragment")?;
        fragments.push(constraint);
    }

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {table} (\n{}\n)",
        fragments.join(",\n")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_table_lays_out_one_fragment_per_line() {
        let sql = build_create_table(
            "people",
            &["id INTEGER PRIMARY KEY", "name TEXT", "age INTEGER"],
            None,
        )
        .unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS people (\nid INTEGER PRIMARY KEY,\nname TEXT,\nage INTEGER\n)"
        );
    }

    #[test]
    fn create_table_appends_constraint_fragment_last() {
        let sql = build_create_table(
            "contents",
            &["id INTEGER PRIMARY KEY", "content TEXT"],
            Some("CONSTRAINT contents_titles_fk\nFOREIGN KEY (content) REFERENCES titles (id)"),
        )
        .unwrap();
        assert!(sql.ends_with(
            "content TEXT,\nCONSTRAINT contents_titles_fk\nFOREIGN KEY (content) REFERENCES titles (id)\n)"
        ));
    }

    #[test]
    fn create_table_rejects_empty_column_list() {
        assert!(build_create_table("people", &[], None).is_err());
    }
}
