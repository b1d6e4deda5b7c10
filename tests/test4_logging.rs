use sqlite_companion::prelude::*;

const SEPARATOR: &str = "__________________________________";

#[test]
fn test4_operations_append_success_entries() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let log = EventLog::new(dir.path().join("ops.log"))?;
    let db = Database::open_in_memory_with_log(log)?;

    db.create_table("people", &["name TEXT"], None)?;
    db.insert_one("people", &ValueRow::new().with_value("name", "John"))?;
    db.select("people", ColumnSpec::All, None)?;
    let log_path = db.log().path().to_path_buf();
    db.close()?;

    let contents = std::fs::read_to_string(log_path)?;
    assert!(contents.contains("connection to in-memory database opened"));
    assert!(contents.contains("CREATE TABLE people succeeded"));
    assert!(contents.contains("INSERT into people succeeded"));
    assert!(contents.contains("SELECT from people succeeded"));
    assert!(contents.contains("disconnection from database (:memory:) succeeded"));
    Ok(())
}

#[test]
fn test4_failures_are_logged_and_returned() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let log = EventLog::new(dir.path().join("ops.log"))?;
    let db = Database::open_in_memory_with_log(log)?;

    // no such table: the typed error comes back AND lands in the log
    let err = db
        .insert_one("missing", &ValueRow::new().with_value("name", "John"))
        .err()
        .expect("insert into missing table must fail");
    assert!(matches!(err, SqlCompanionError::SqliteError(_)));

    let contents = std::fs::read_to_string(db.log().path())?;
    assert!(contents.contains("INSERT into missing failed"));
    assert!(contents.contains("Function: insert_one"));
    Ok(())
}

#[test]
fn test4_entries_carry_origin_and_separator() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let log = EventLog::new(dir.path().join("ops.log"))?;
    let db = Database::open_in_memory_with_log(log)?;

    db.create_table("t", &["id INTEGER"], None)?;

    let contents = std::fs::read_to_string(db.log().path())?;
    let entries = contents.matches(SEPARATOR).count();
    assert!(entries >= 2, "one entry per operation, separator-terminated");
    assert!(contents.contains("File: "));
    assert!(contents.contains("Function: create_table"));
    Ok(())
}

#[test]
fn test4_log_handles_are_shared_between_instances() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let log = EventLog::new(dir.path().join("shared.log"))?;

    let a = Database::open_in_memory_with_log(log.clone())?;
    let b = Database::open_in_memory_with_log(log.clone())?;
    a.create_table("t", &["id INTEGER"], None)?;
    b.create_table("u", &["id INTEGER"], None)?;

    let contents = std::fs::read_to_string(log.path())?;
    assert!(contents.contains("CREATE TABLE t succeeded"));
    assert!(contents.contains("CREATE TABLE u succeeded"));
    Ok(())
}
