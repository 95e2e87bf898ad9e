//! Logger utility for recording operations
//!
//! Console logging goes through the `log` facade and `env_logger`. This
//! module adds a file-backed operation log that commands append their
//! outcomes to, so dataset registrations leave a trail next to the
//! working directory.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::LevelFilter;

/// File-backed operation log
pub struct Logger {
    /// File handle for log output, `None` when disabled
    file: Mutex<Option<File>>,
}

impl Logger {
    /// Creates a new logger appending to `log_file`
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be opened
    pub fn new(log_file: &str) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
        })
    }

    /// A logger that records nothing
    pub fn disabled() -> Self {
        Logger {
            file: Mutex::new(None),
        }
    }

    /// Logs a message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "operation log lock poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Static method to initialize console logging
    pub fn init_global_logger(verbose: bool) {
        let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

        // Ignore the error if a logger was already installed (e.g. in tests)
        if env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format_timestamp(None)
            .try_init()
            .is_err()
        {
            eprintln!("Warning: Global logger was already initialized");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_log_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ops.log");
        let path_str = path.to_str().unwrap();

        Logger::new(path_str).unwrap().log("first").unwrap();
        Logger::new(path_str).unwrap().log("second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_disabled_logger_accepts_messages() {
        assert!(Logger::disabled().log("dropped").is_ok());
    }
}
