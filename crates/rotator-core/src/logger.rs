//! Per-account status logging
//!
//! Every logged line goes two places: the console, tagged with the account
//! id and styled by level, and a per-account daily file under the log
//! directory. File lines carry an RFC 3339 timestamp; console lines don't.
//!
//! Logging is a side effect, not a correctness requirement: file-system
//! failures are traced at warn level and swallowed so they can never stall
//! or crash the driver.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use colored::Colorize;
use tracing::warn;

/// Console styling level for one status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Plain,
    Info,
    Success,
    Warning,
    Error,
}

/// Console + daily-file logger for account status lines.
pub struct AccountLogger {
    log_dir: PathBuf,
}

impl AccountLogger {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    /// Log one status line for an account.
    ///
    /// Never errors; the driver must not be blocked by a full disk or a
    /// read-only log directory.
    pub fn log(&self, account_id: usize, level: Level, message: &str) {
        let line = format!("[Account {account_id}] {message}");
        match level {
            Level::Plain => println!("{line}"),
            Level::Info => println!("{}", line.cyan()),
            Level::Success => println!("{}", line.green()),
            Level::Warning => println!("{}", line.yellow()),
            Level::Error => println!("{}", line.red()),
        }

        if let Err(e) = self.append(account_id, message) {
            warn!(account_id, error = %e, "failed to append account log file");
        }
    }

    /// Path of the account's log file for today.
    pub fn daily_file(&self, account_id: usize) -> PathBuf {
        let day = Utc::now().format("%Y-%m-%d");
        self.log_dir.join(format!("account_{account_id}_{day}.log"))
    }

    fn append(&self, account_id: usize, message: &str) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.log_dir)?;
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.daily_file(account_id))?;
        writeln!(file, "[{stamp}] {message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_appends_to_per_account_daily_file() {
        let dir = tempfile::tempdir().unwrap();
        let logger = AccountLogger::new(dir.path().join("logs"));

        logger.log(3, Level::Plain, "balance: 12.00");

        let contents = std::fs::read_to_string(logger.daily_file(3)).unwrap();
        assert!(contents.ends_with("balance: 12.00\n"), "got: {contents}");
        assert!(contents.starts_with('['), "missing timestamp: {contents}");
    }

    #[test]
    fn entries_accumulate_append_only() {
        let dir = tempfile::tempdir().unwrap();
        let logger = AccountLogger::new(dir.path().join("logs"));

        logger.log(1, Level::Info, "first");
        logger.log(1, Level::Error, "second");

        let contents = std::fs::read_to_string(logger.daily_file(1)).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("first"));
        assert!(lines[1].ends_with("second"));
    }

    #[test]
    fn accounts_get_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let logger = AccountLogger::new(dir.path().join("logs"));

        logger.log(1, Level::Plain, "for one");
        logger.log(2, Level::Plain, "for two");

        assert_ne!(logger.daily_file(1), logger.daily_file(2));
        assert!(logger.daily_file(1).exists());
        assert!(logger.daily_file(2).exists());
    }

    #[test]
    fn file_line_timestamp_is_rfc3339() {
        let dir = tempfile::tempdir().unwrap();
        let logger = AccountLogger::new(dir.path().join("logs"));

        logger.log(1, Level::Plain, "stamped");

        let contents = std::fs::read_to_string(logger.daily_file(1)).unwrap();
        let stamp = contents
            .split(']')
            .next()
            .unwrap()
            .trim_start_matches('[');
        assert!(
            chrono::DateTime::parse_from_rfc3339(stamp).is_ok(),
            "unparseable timestamp: {stamp}"
        );
    }

    #[test]
    fn unwritable_log_dir_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the log directory should be makes create_dir_all fail
        let blocker = dir.path().join("logs");
        std::fs::write(&blocker, "occupied").unwrap();

        let logger = AccountLogger::new(&blocker);
        // Must not panic or propagate
        logger.log(1, Level::Error, "goes nowhere");
    }
}
