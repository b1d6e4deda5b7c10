use thiserror::Error;

/// Errors surfaced by every high-level operation.
///
/// Failures are still appended to the [`EventLog`](crate::logging::EventLog)
/// as a side effect, but the caller observes them through this enum rather
/// than by tailing a file.
#[derive(Debug, Error)]
pub enum SqlCompanionError {
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Log file error: {0}")]
    LogError(#[from] std::io::Error),
}
