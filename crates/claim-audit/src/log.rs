//! The claim history file.
//!
//! Read-modify-write: each append loads the current array, pushes one entry
//! and rewrites the whole file through a temp file + rename, so a crash
//! never leaves a half-written history behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AuditError, AuditResult};
use crate::record::{ClaimRecord, ClaimStatus};

/// Default history file name, relative to the working directory.
pub const DEFAULT_HISTORY_FILE: &str = "referral-history.json";

/// Totals over the history file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditStats {
    /// Number of entries in the file.
    pub total: usize,
    /// Entries with status `success`.
    pub succeeded: usize,
    /// Entries with status `failed`.
    pub failed: usize,
    /// Entries that are not claim records.
    pub unrecognized: usize,
}

/// Append-only claim history stored as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Create a log backed by `path`. The file is created on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, preserving every existing entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or if the
    /// rewritten file cannot be persisted.
    pub fn append(&self, record: &ClaimRecord) -> AuditResult<()> {
        let mut entries = self.load_entries()?;
        entries.push(serde_json::to_value(record)?);
        self.persist(&entries)?;

        debug!(
            path = %self.path.display(),
            address = %record.address,
            status = %record.status,
            entries = entries.len(),
            "claim record appended"
        );
        Ok(())
    }

    /// All entries that parse as [`ClaimRecord`], in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn records(&self) -> AuditResult<Vec<ClaimRecord>> {
        Ok(self
            .load_entries()?
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect())
    }

    /// Count entries by outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn stats(&self) -> AuditResult<AuditStats> {
        let entries = self.load_entries()?;
        let mut stats = AuditStats {
            total: entries.len(),
            ..AuditStats::default()
        };

        for entry in entries {
            match serde_json::from_value::<ClaimRecord>(entry) {
                Ok(record) if record.status == ClaimStatus::Success => {
                    stats.succeeded = stats.succeeded.saturating_add(1);
                },
                Ok(_) => stats.failed = stats.failed.saturating_add(1),
                Err(_) => stats.unrecognized = stats.unrecognized.saturating_add(1),
            }
        }
        Ok(stats)
    }

    /// Load raw entries. Missing or unparsable files yield an empty list.
    fn load_entries(&self) -> AuditResult<Vec<Value>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "history file not found, starting empty");
                return Ok(Vec::new());
            },
            Err(e) => return Err(self.storage_error(e)),
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(_) => {
                warn!(path = %self.path.display(), "history file is not a JSON array, treating as empty");
                Ok(Vec::new())
            },
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "history file is corrupt, treating as empty");
                Ok(Vec::new())
            },
        }
    }

    /// Rewrite the whole file atomically.
    fn persist(&self, entries: &[Value]) -> AuditResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| self.storage_error(e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| self.storage_error(e))?;
        let json = serde_json::to_string_pretty(entries)?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| self.storage_error(e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| self.storage_error(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.storage_error(e.error))?;
        Ok(())
    }

    fn storage_error(&self, source: std::io::Error) -> AuditError {
        AuditError::StorageError {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log() -> (tempfile::TempDir, AuditLog) {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join(DEFAULT_HISTORY_FILE));
        (dir, log)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (_dir, log) = temp_log();
        assert!(log.records().unwrap().is_empty());
        assert_eq!(log.stats().unwrap(), AuditStats::default());
    }

    #[test]
    fn test_append_preserves_order() {
        let (_dir, log) = temp_log();
        for i in 0..3 {
            let status = if i == 1 {
                ClaimStatus::Success
            } else {
                ClaimStatus::Failed
            };
            log.append(&ClaimRecord::new(format!("0x{i}"), "CODE", status))
                .unwrap();
        }

        let records = log.records().unwrap();
        let addresses: Vec<_> = records.iter().map(|r| r.address.as_str()).collect();
        assert_eq!(addresses, ["0x0", "0x1", "0x2"]);

        let stats = log.stats().unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.failed, 2);
    }

    #[test]
    fn test_corrupt_file_treated_as_empty() {
        let (_dir, log) = temp_log();
        std::fs::write(log.path(), "{not json").unwrap();

        log.append(&ClaimRecord::new("0xa", "C", ClaimStatus::Failed))
            .unwrap();
        assert_eq!(log.records().unwrap().len(), 1);
    }

    #[test]
    fn test_non_array_treated_as_empty() {
        let (_dir, log) = temp_log();
        std::fs::write(log.path(), r#"{"address":"0x1"}"#).unwrap();
        assert!(log.records().unwrap().is_empty());
    }

    #[test]
    fn test_foreign_entries_preserved() {
        let (_dir, log) = temp_log();
        std::fs::write(
            log.path(),
            r#"[{"timestamp":"2024-01-01T00:00:00.000Z","address":"0xold","referralCode":"X","status":"pending","txHash":null}]"#,
        )
        .unwrap();

        log.append(&ClaimRecord::new("0xnew", "C", ClaimStatus::Success))
            .unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(log.path()).unwrap()).unwrap();
        let entries = raw.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["referralCode"], "X");
        assert_eq!(entries[1]["address"], "0xnew");

        let stats = log.stats().unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.unrecognized, 1);
        assert_eq!(stats.succeeded, 1);
    }

    #[test]
    fn test_file_is_pretty_printed() {
        let (_dir, log) = temp_log();
        log.append(&ClaimRecord::new("0xa", "C", ClaimStatus::Success))
            .unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert!(content.starts_with("[\n  {\n    \"timestamp\""));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("nested").join("history.json"));
        log.append(&ClaimRecord::new("0xa", "C", ClaimStatus::Failed))
            .unwrap();
        assert!(log.path().exists());
    }
}
