use std::sync::{Mutex, MutexGuard, PoisonError};

use function_name::named;
use rusqlite::Connection;

use crate::error::SqlCompanionError;
use crate::executor::{run_dml, run_select};
use crate::logging::EventLog;
use crate::model::{ColumnSpec, ValueRow};
use crate::query_builder::{
    build_create_table, build_delete, build_insert, build_select, build_update,
};
use crate::results::ResultSet;

/// Default operation log, used when the caller does not supply one.
const DEFAULT_LOG: &str = "db.log";

/// One on-disk (or in-memory) SQLite database with a shared operation log.
///
/// Owns exactly one `rusqlite::Connection`; every statement serializes
/// through the mutex, so a `Database` can be shared across threads even
/// though the underlying connection is not reentrant. The connection stays in
/// auto-commit mode: each mutating operation is durable when it returns.
///
/// ```no_run
/// use sqlite_companion::prelude::*;
///
/// # fn demo() -> Result<(), SqlCompanionError> {
/// let db = Database::open("app")?;
/// db.create_table("people", &["id INTEGER PRIMARY KEY", "name TEXT", "age INTEGER"], None)?;
/// db.insert_one("people", &ValueRow::new().with_value("name", "John").with_value("age", 34))?;
/// let rows = db.select("people", ["name", "age"], None)?;
/// # let _ = rows;
/// db.close()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
    log: EventLog,
    db_name: String,
}

impl Database {
    /// Open (or create) `<name>.db`, logging to `db.log`.
    ///
    /// A trailing `.db` on `name` is stripped before the extension is
    /// re-applied, so `open("app")` and `open("app.db")` address the same
    /// file.
    ///
    /// # Errors
    /// Returns `SqlCompanionError::ParameterError` for an empty name, or a
    /// connection/log error if either file cannot be opened. Open failures
    /// are appended to the log before being returned.
    pub fn open(name: &str) -> Result<Self, SqlCompanionError> {
        let log = EventLog::new(DEFAULT_LOG)?;
        Self::open_with_log(name, log)
    }

    /// Open (or create) `<name>.db` with a caller-supplied operation log.
    ///
    /// # Errors
    /// Same contract as [`Database::open`].
    #[named]
    pub fn open_with_log(name: &str, log: EventLog) -> Result<Self, SqlCompanionError> {
        if name.trim().is_empty() {
            let err =
                SqlCompanionError::ParameterError("database name must be a non-empty string".into());
            note(&log, &format!("open failed: {err}"), function_name!());
            return Err(err);
        }
        let db_name = name.strip_suffix(".db").unwrap_or(name).to_string();
        let path = format!("{db_name}.db");
        match Connection::open(&path) {
            Ok(conn) => {
                note(
                    &log,
                    &format!("connection to database ({db_name}) opened"),
                    function_name!(),
                );
                Ok(Self {
                    conn: Mutex::new(conn),
                    log,
                    db_name,
                })
            }
            Err(e) => {
                note(
                    &log,
                    &format!("connection to database ({db_name}) failed: {e}"),
                    function_name!(),
                );
                Err(SqlCompanionError::SqliteError(e))
            }
        }
    }

    /// Open an in-memory database, useful for tests and scratch work.
    ///
    /// # Errors
    /// Returns `SqlCompanionError::SqliteError` if SQLite cannot allocate the
    /// in-memory database.
    #[named]
    pub fn open_in_memory_with_log(log: EventLog) -> Result<Self, SqlCompanionError> {
        let conn = Connection::open_in_memory()?;
        note(&log, "connection to in-memory database opened", function_name!());
        Ok(Self {
            conn: Mutex::new(conn),
            log,
            db_name: ":memory:".to_string(),
        })
    }

    /// Flush and release the connection.
    ///
    /// Auto-commit means no transaction can be pending; this exists so the
    /// release point is explicit rather than tied to drop timing, and so a
    /// close failure is observable.
    ///
    /// # Errors
    /// Returns `SqlCompanionError::SqliteError` if SQLite refuses to close
    /// (e.g. an unfinalized statement); the failure is logged first.
    #[named]
    pub fn close(self) -> Result<(), SqlCompanionError> {
        let Database { conn, log, db_name } = self;
        let conn = conn.into_inner().unwrap_or_else(PoisonError::into_inner);
        match conn.close() {
            Ok(()) => {
                note(
                    &log,
                    &format!("disconnection from database ({db_name}) succeeded"),
                    function_name!(),
                );
                Ok(())
            }
            Err((_conn, e)) => {
                note(
                    &log,
                    &format!("disconnection from database ({db_name}) failed: {e}"),
                    function_name!(),
                );
                Err(SqlCompanionError::SqliteError(e))
            }
        }
    }

    /// The operation log this database reports to.
    #[must_use]
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Run arbitrary SQL text.
    ///
    /// A lower-cased copy is inspected for the substring `select`: if
    /// present, the statement runs as a query and every row comes back as
    /// `Some(ResultSet)`; otherwise the statement executes, auto-commits, and
    /// the call returns `None`.
    ///
    /// # Errors
    /// Returns `SqlCompanionError` on execution failure; the failure is
    /// logged.
    #[named]
    pub fn execute(&self, sql: &str) -> Result<Option<ResultSet>, SqlCompanionError> {
        let outcome = if sql.to_lowercase().contains("select") {
            run_select(&self.lock_conn(), sql, &[]).map(Some)
        } else {
            self.lock_conn()
                .execute(sql, [])
                .map(|_| None)
                .map_err(SqlCompanionError::SqliteError)
        };
        self.report("raw statement execution", function_name!(), &outcome);
        outcome
    }

    /// `SELECT <columns-or-*> FROM <table> [WHERE <predicate>]`, returning
    /// the full result set in statement order.
    ///
    /// # Errors
    /// Returns `SqlCompanionError` on validation or execution failure; the
    /// failure is logged.
    #[named]
    pub fn select(
        &self,
        table: &str,
        columns: impl Into<ColumnSpec>,
        predicate: Option<&str>,
    ) -> Result<ResultSet, SqlCompanionError> {
        let outcome = build_select(table, &columns.into(), predicate)
            .and_then(|sql| run_select(&self.lock_conn(), &sql, &[]));
        self.report(&format!("SELECT from {table}"), function_name!(), &outcome);
        outcome
    }

    /// Insert one row, columns and bound values in mapping order.
    ///
    /// # Errors
    /// Returns `SqlCompanionError` on validation or execution failure; no
    /// statement runs if validation fails. The outcome is logged either way.
    #[named]
    pub fn insert_one(&self, table: &str, row: &ValueRow) -> Result<(), SqlCompanionError> {
        let outcome = build_insert(table, row)
            .and_then(|qp| run_dml(&self.lock_conn(), &qp.query, &qp.params))
            .map(|_| ());
        self.report(&format!("INSERT into {table}"), function_name!(), &outcome);
        outcome
    }

    /// Insert each row independently via [`Database::insert_one`].
    ///
    /// A failing element is logged and skipped; later elements still run.
    /// There is no cross-element atomicity. Returns the number of rows
    /// actually inserted.
    ///
    /// # Errors
    /// Infallible in practice today; the `Result` keeps the signature uniform
    /// with the other operations.
    #[named]
    pub fn insert_many(&self, table: &str, rows: &[ValueRow]) -> Result<usize, SqlCompanionError> {
        let mut inserted = 0;
        for row in rows {
            if self.insert_one(table, row).is_ok() {
                inserted += 1;
            }
        }
        let outcome = Ok(inserted);
        self.report(
            &format!("INSERT many into {table} ({inserted} of {} rows)", rows.len()),
            function_name!(),
            &outcome,
        );
        outcome
    }

    /// `UPDATE <table> SET c1 = ?, ... [WHERE <predicate>]`, values bound in
    /// mapping order, constrained to the same scalar set as insert. Returns
    /// rows affected.
    ///
    /// # Errors
    /// Returns `SqlCompanionError` on validation or execution failure; the
    /// failure is logged.
    #[named]
    pub fn update(
        &self,
        table: &str,
        row: &ValueRow,
        predicate: Option<&str>,
    ) -> Result<usize, SqlCompanionError> {
        let outcome = build_update(table, row, predicate)
            .and_then(|qp| run_dml(&self.lock_conn(), &qp.query, &qp.params));
        self.report(&format!("UPDATE of {table}"), function_name!(), &outcome);
        outcome
    }

    /// `DELETE FROM <table> WHERE <predicate>`; the predicate is mandatory.
    /// Returns rows affected.
    ///
    /// # Errors
    /// Returns `SqlCompanionError` on validation or execution failure; the
    /// failure is logged.
    #[named]
    pub fn delete(&self, table: &str, predicate: &str) -> Result<usize, SqlCompanionError> {
        let outcome = build_delete(table, Some(predicate))
            .and_then(|sql| run_dml(&self.lock_conn(), &sql, &[]));
        self.report(&format!("DELETE from {table}"), function_name!(), &outcome);
        outcome
    }

    /// `DELETE FROM <table>` with no predicate, removing every row. Returns
    /// rows affected (zero when already empty).
    ///
    /// # Errors
    /// Returns `SqlCompanionError` on validation or execution failure; the
    /// failure is logged.
    #[named]
    pub fn clear_table(&self, table: &str) -> Result<usize, SqlCompanionError> {
        let outcome =
            build_delete(table, None).and_then(|sql| run_dml(&self.lock_conn(), &sql, &[]));
        self.report(&format!("clearing of {table}"), function_name!(), &outcome);
        outcome
    }

    /// `CREATE TABLE IF NOT EXISTS <table> (...)` from raw column definition
    /// fragments plus an optional trailing constraint fragment. Idempotent.
    ///
    /// # Errors
    /// Returns `SqlCompanionError` on validation or execution failure; the
    /// failure is logged.
    #[named]
    pub fn create_table(
        &self,
        table: &str,
        columns: &[&str],
        constraint: Option<&str>,
    ) -> Result<(), SqlCompanionError> {
        let outcome = build_create_table(table, columns, constraint)
            .and_then(|sql| run_dml(&self.lock_conn(), &sql, &[]))
            .map(|_| ());
        self.report(&format!("CREATE TABLE {table}"), function_name!(), &outcome);
        outcome
    }

    fn lock_conn(&self) -> MutexGuard<'_, Connection> {
        // Statement-level atomicity in SQLite keeps the connection usable
        // after a panic in another holder.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn report<T>(&self, what: &str, origin_function: &str, outcome: &Result<T, SqlCompanionError>) {
        let message = match outcome {
            Ok(_) => format!("{what} succeeded"),
            Err(e) => format!("{what} failed: {e}"),
        };
        note(&self.log, &message, origin_function);
    }
}

/// Append to the log, never masking the operation outcome with a log failure.
fn note(log: &EventLog, message: &str, origin_function: &str) {
    if let Err(log_err) = log.append(message, file!(), origin_function) {
        tracing::warn!(%log_err, message, "failed to append to operation log");
    }
}
