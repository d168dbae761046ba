use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::config::app_config::AuditSection;
use crate::core::errors::{Result, SeckitError};
use crate::core::models::audit_entry::{AuditAction, AuditEntry};
use crate::core::traits::audit::AuditLogger;

/// Audit logger that appends entries as JSON lines to a file.
///
/// Each line is one self-contained `AuditEntry`, so appends are cheap and
/// reads can stream line by line.
pub struct JsonAuditLogger {
    log_path: PathBuf,
}

impl JsonAuditLogger {
    /// Create a logger that writes to `{home}/{log_file}`.
    pub fn new(home: &Path, log_file: &str) -> Self {
        Self {
            log_path: home.join(log_file),
        }
    }

    /// Create a logger from the `[audit]` section, falling back to
    /// `audit.log` when the section is missing.
    pub fn from_config(home: &Path, audit_section: Option<&AuditSection>) -> Self {
        let log_file = audit_section
            .map(|a| a.log_file.as_str())
            .unwrap_or("audit.log");
        Self::new(home, log_file)
    }

    /// Auditing is on unless the config explicitly disables it.
    pub fn is_enabled(audit_section: Option<&AuditSection>) -> bool {
        audit_section.map(|a| a.enabled).unwrap_or(true)
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

impl AuditLogger for JsonAuditLogger {
    fn log_event(&self, entry: &AuditEntry) -> Result<()> {
        let line = serde_json::to_string(entry).map_err(|e| SeckitError::AuditError {
            detail: format!("Failed to serialize audit entry: {e}"),
        })?;

        if let Some(parent) = self.log_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| SeckitError::AuditError {
                detail: format!("Cannot open audit log at {}: {e}", self.log_path.display()),
            })?;

        writeln!(file, "{line}").map_err(|e| SeckitError::AuditError {
            detail: format!("Failed to write audit entry: {e}"),
        })?;

        Ok(())
    }

    fn query(&self, action: Option<AuditAction>) -> Result<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&self.log_path).map_err(|e| SeckitError::AuditError {
            detail: format!("Cannot read audit log: {e}"),
        })?;

        let mut entries = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| SeckitError::AuditError {
                detail: format!("Error reading audit log line {}: {e}", line_num + 1),
            })?;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let entry: AuditEntry =
                serde_json::from_str(trimmed).map_err(|e| SeckitError::AuditError {
                    detail: format!("Malformed audit entry at line {}: {e}", line_num + 1),
                })?;

            if action.is_some_and(|a| a != entry.action) {
                continue;
            }

            entries.push(entry);
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::audit_entry::AuditOutcome;
    use chrono::Utc;
    use tempfile::TempDir;

    fn sample_entry(action: AuditAction, item: &str) -> AuditEntry {
        AuditEntry {
            timestamp: Utc::now(),
            author: "tester".to_string(),
            action,
            outcome: AuditOutcome::Success,
            items: vec![item.to_string()],
            detail: None,
        }
    }

    #[test]
    fn log_and_query_round_trip() {
        let tmp = TempDir::new().unwrap();
        let logger = JsonAuditLogger::new(tmp.path(), "audit.log");

        logger
            .log_event(&sample_entry(AuditAction::Set, "username"))
            .unwrap();

        let results = logger.query(None).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].action, AuditAction::Set);
        assert_eq!(results[0].items, vec!["username".to_string()]);
    }

    #[test]
    fn filter_by_action() {
        let tmp = TempDir::new().unwrap();
        let logger = JsonAuditLogger::new(tmp.path(), "audit.log");

        logger.log_event(&sample_entry(AuditAction::Set, "a")).unwrap();
        logger.log_event(&sample_entry(AuditAction::Remove, "a")).unwrap();
        logger.log_event(&sample_entry(AuditAction::Set, "b")).unwrap();

        let sets = logger.query(Some(AuditAction::Set)).unwrap();
        assert_eq!(sets.len(), 2);
        assert!(sets.iter().all(|e| e.action == AuditAction::Set));
    }

    #[test]
    fn query_missing_log_is_empty() {
        let tmp = TempDir::new().unwrap();
        let logger = JsonAuditLogger::new(tmp.path(), "audit.log");
        assert!(logger.query(None).unwrap().is_empty());
    }

    #[test]
    fn malformed_line_is_reported() {
        let tmp = TempDir::new().unwrap();
        let logger = JsonAuditLogger::new(tmp.path(), "audit.log");
        fs::write(logger.path(), "not json\n").unwrap();

        let err = logger.query(None).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn disabled_by_config() {
        let section = AuditSection {
            enabled: false,
            log_file: "audit.log".into(),
        };
        assert!(!JsonAuditLogger::is_enabled(Some(&section)));
        assert!(JsonAuditLogger::is_enabled(None));
    }
}
