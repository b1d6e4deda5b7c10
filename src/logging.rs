use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Local;

use crate::error::SqlCompanionError;

const SEPARATOR: &str = "__________________________________";

/// Append-only structured operation log backed by a single file.
///
/// Each entry is four lines: a timestamp, the origin (`File: ...\tFunction:
/// ...`), the message, and a separator. Entries from concurrent handles are
/// kept whole by a mutex around the file handle.
#[derive(Clone)]
pub struct EventLog {
    file: Arc<Mutex<File>>,
    path: PathBuf,
}

impl EventLog {
    /// Open (or create) the log file in append mode.
    ///
    /// A `.log` extension is added when the given name carries none.
    ///
    /// # Errors
    /// Returns `SqlCompanionError::LogError` if the file cannot be opened.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, SqlCompanionError> {
        let mut path = path.into();
        if path.extension().is_none() {
            path.set_extension("log");
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            file: Arc::new(Mutex::new(file)),
            path,
        })
    }

    /// Append one entry: timestamp, origin file and function, message,
    /// separator.
    ///
    /// # Errors
    /// Returns `SqlCompanionError::LogError` if the write or flush fails.
    pub fn append(
        &self,
        message: &str,
        origin_file: &str,
        origin_function: &str,
    ) -> Result<(), SqlCompanionError> {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S%.6f");
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(file, "{stamp}")?;
        writeln!(file, "File: {origin_file}\tFunction: {origin_function}")?;
        writeln!(file, "{message}")?;
        writeln!(file, "{SEPARATOR}")?;
        file.flush()?;
        tracing::debug!(origin_file, origin_function, message, "log entry appended");
        Ok(())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog").field("path", &self.path).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_log_extension_when_missing() -> Result<(), SqlCompanionError> {
        let dir = tempfile::tempdir()?;
        let log = EventLog::new(dir.path().join("db"))?;
        assert_eq!(log.path().extension().unwrap(), "log");
        Ok(())
    }

    #[test]
    fn entry_has_four_line_shape() -> Result<(), SqlCompanionError> {
        let dir = tempfile::tempdir()?;
        let log = EventLog::new(dir.path().join("ops.log"))?;
        log.append("INSERT into people committed", "db.rs", "insert_one")?;

        let contents = std::fs::read_to_string(log.path())?;
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "File: db.rs\tFunction: insert_one");
        assert_eq!(lines[2], "INSERT into people committed");
        assert_eq!(lines[3], SEPARATOR);
        Ok(())
    }
}
