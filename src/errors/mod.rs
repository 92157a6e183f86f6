//! Usage errors and the error log

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use anyhow::Result;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

/// Errors raised before any API call is made
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("invalid flag combination, --verbose and --json")]
    VerboseJsonCombo,

    #[error("invalid flag combination: --enable and --disable")]
    EnableDisableCombo,

    #[error("error reading service: no service ID found")]
    NoServiceId,

    #[error("cannot specify both service-id and service-name")]
    ServiceIdAndName,

    #[error("unrecognised product: {0}")]
    UnknownProduct(String),
}

/// Sink for errors that commands want recorded alongside the failure
pub trait ErrorLog: Send + Sync {
    fn add(&self, err: &anyhow::Error);
    fn add_with_context(&self, err: &anyhow::Error, context: &[(&str, &str)]);
}

/// A recorded error
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: DateTime<Utc>,
    pub message: String,
    pub context: Vec<(String, String)>,
}

/// In-memory error log, persisted to disk when a command fails
#[derive(Debug, Default)]
pub struct LogEntries {
    entries: Mutex<Vec<LogEntry>>,
}

impl LogEntries {
    /// Snapshot of the recorded entries
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, entry: LogEntry) {
        debug!(error = %entry.message, context = ?entry.context, "recorded error");
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    /// Append the recorded entries to the log file at `path`
    pub fn persist(&self, path: &Path, args: &[String]) -> Result<()> {
        let entries = self.entries();
        if entries.is_empty() {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        writeln!(file, "TIMESTAMP:\n{}\n", Utc::now().to_rfc3339())?;
        writeln!(file, "COMMAND:\nfastly {}\n", args.join(" "))?;
        writeln!(file, "ERRORS:")?;
        for entry in &entries {
            writeln!(file, "[{}] {}", entry.time.to_rfc3339(), entry.message)?;
            for (key, value) in &entry.context {
                writeln!(file, "  {}: {}", key, value)?;
            }
        }
        writeln!(file)?;

        Ok(())
    }
}

impl ErrorLog for LogEntries {
    fn add(&self, err: &anyhow::Error) {
        self.add_with_context(err, &[]);
    }

    fn add_with_context(&self, err: &anyhow::Error, context: &[(&str, &str)]) {
        self.push(LogEntry {
            time: Utc::now(),
            message: err.to_string(),
            context: context
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_messages() {
        assert_eq!(
            UsageError::VerboseJsonCombo.to_string(),
            "invalid flag combination, --verbose and --json"
        );
        assert_eq!(
            UsageError::NoServiceId.to_string(),
            "error reading service: no service ID found"
        );
    }

    #[test]
    fn test_add_with_context() {
        let log = LogEntries::default();
        log.add(&anyhow::anyhow!("first"));
        log.add_with_context(&anyhow::anyhow!("second"), &[("service_id", "123")]);

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert!(entries[0].context.is_empty());
        assert_eq!(
            entries[1].context,
            vec![("service_id".to_string(), "123".to_string())]
        );
    }

    #[test]
    fn test_persist_writes_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fastly").join("errors.log");

        let log = LogEntries::default();
        log.add_with_context(&anyhow::anyhow!("test error"), &[("service_id", "123")]);
        log.persist(&path, &["fanout".to_string(), "status".to_string()])
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("fastly fanout status"));
        assert!(contents.contains("test error"));
        assert!(contents.contains("service_id: 123"));
    }

    #[test]
    fn test_persist_skips_empty_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("errors.log");

        LogEntries::default().persist(&path, &[]).unwrap();
        assert!(!path.exists());
    }
}
