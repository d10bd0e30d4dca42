// digipin-core/src/infrastructure/adapters/audit_log.rs

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::DigipinError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::audit::{AuditRecord, AuditSink};

pub const DEFAULT_LIST_LIMIT: usize = 100;
pub const EXPORT_LIMIT: usize = 1000;

/// Append-only audit trail, one JSON object per line.
pub struct JsonlAuditLog {
    path: PathBuf,
    // Serializes appends from concurrent calls.
    write_lock: Mutex<()>,
}

impl JsonlAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries for `user_id`, newest first. A missing file is an empty log;
    /// unreadable lines are skipped.
    pub async fn entries_for_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditRecord>, InfrastructureError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries: Vec<AuditRecord> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<AuditRecord>(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(path = ?self.path, error = %e, "Skipping unreadable audit line");
                    None
                }
            })
            .filter(|entry| entry.user_id == user_id)
            .collect();

        // Stable sort keeps append order for equal timestamps; reverse after.
        entries.sort_by_key(|entry| entry.timestamp);
        entries.reverse();
        entries.truncate(limit);
        Ok(entries)
    }

    /// Writes up to [`EXPORT_LIMIT`] entries of `user_id` as a pretty JSON
    /// array. Returns how many were written.
    pub async fn export(
        &self,
        user_id: &str,
        destination: &Path,
    ) -> Result<usize, InfrastructureError> {
        let entries = self.entries_for_user(user_id, EXPORT_LIMIT).await?;
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(destination, json).await?;
        info!(path = ?destination, count = entries.len(), "Audit log exported");
        Ok(entries.len())
    }

    async fn append(&self, entry: &AuditRecord) -> Result<(), InfrastructureError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        debug!(id = %entry.id, action = ?entry.action, "Audit entry appended");
        Ok(())
    }
}

#[async_trait]
impl AuditSink for JsonlAuditLog {
    async fn record(&self, entry: AuditRecord) -> Result<(), DigipinError> {
        self.append(&entry).await.map_err(DigipinError::from)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::geo::Coordinate;
    use crate::ports::audit::{AuditAction, Source};
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;
    use tempfile::tempdir;

    fn entry(user_id: &str, minutes: i64, action: AuditAction) -> AuditRecord {
        AuditRecord {
            id: format!("{user_id}-{minutes}"),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes),
            user_id: user_id.to_string(),
            action,
            request_id: None,
            digipin: Some("DPDBBA01B7740".into()),
            coordinates: Some(Coordinate::new(0.0, 0.0)),
            input: json!({"latitude": 0.0, "longitude": 0.0}),
            result: json!({"digipin": "DPDBBA01B7740"}),
            source: Source::Offline,
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_an_empty_log() {
        let dir = tempdir().unwrap();
        let log = JsonlAuditLog::new(dir.path().join("audit.jsonl"));
        assert!(log.entries_for_user("alice", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_entries_are_filtered_and_newest_first() {
        let dir = tempdir().unwrap();
        let log = JsonlAuditLog::new(dir.path().join("logs/audit.jsonl"));

        log.record(entry("alice", 0, AuditAction::RequestConsent)).await.unwrap();
        log.record(entry("bob", 1, AuditAction::GenerateDigipin)).await.unwrap();
        log.record(entry("alice", 2, AuditAction::ValidateAddress)).await.unwrap();
        log.record(entry("alice", 1, AuditAction::GenerateDigipin)).await.unwrap();

        let entries = log.entries_for_user("alice", DEFAULT_LIST_LIMIT).await.unwrap();
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["alice-2", "alice-1", "alice-0"]);

        let limited = log.entries_for_user("alice", 1).await.unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].action, AuditAction::ValidateAddress);
    }

    #[tokio::test]
    async fn test_garbage_lines_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let log = JsonlAuditLog::new(&path);
        log.record(entry("alice", 0, AuditAction::GenerateDigipin)).await.unwrap();

        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("not json\n\n");
        std::fs::write(&path, content).unwrap();
        log.record(entry("alice", 5, AuditAction::GenerateDigipin)).await.unwrap();

        assert_eq!(log.entries_for_user("alice", 10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_export_writes_json_array() {
        let dir = tempdir().unwrap();
        let log = JsonlAuditLog::new(dir.path().join("audit.jsonl"));
        log.record(entry("alice", 0, AuditAction::GenerateDigipin)).await.unwrap();
        log.record(entry("alice", 3, AuditAction::RequestConsent)).await.unwrap();

        let out = dir.path().join("export.json");
        let count = log.export("alice", &out).await.unwrap();
        assert_eq!(count, 2);

        let exported: Vec<AuditRecord> =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(exported.len(), 2);
        assert_eq!(exported[0].action, AuditAction::RequestConsent);
    }
}
