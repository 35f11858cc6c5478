//! Timestamped backups of the hosts file, and restore.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EngineError, Result};
use crate::config::Paths;
use crate::platform;
use crate::report::Reporter;
use crate::writer;

/// Backup filename prefix; the rest is a `YYYYMMDD_HHMMSS` stamp.
pub const BACKUP_PREFIX: &str = "hosts_backup_";
const BACKUP_EXT: &str = ".txt";

/// One backup file in the store, keyed by its timestamped name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    pub name: String,
    pub path: PathBuf,
}

impl BackupRecord {
    /// The embedded `YYYYMMDD_HHMMSS` stamp.
    pub fn stamp(&self) -> &str {
        self.name
            .strip_prefix(BACKUP_PREFIX)
            .unwrap_or(&self.name)
            .trim_end_matches(BACKUP_EXT)
    }
}

/// Copy the live hosts file into the backup store under a timestamped name.
/// Two backups within the same second overwrite silently; an accepted
/// limitation of second-resolution naming.
pub fn create_backup(paths: &Paths, live: &Path, reporter: &dyn Reporter) -> Result<BackupRecord> {
    fs::create_dir_all(&paths.backup_dir).map_err(EngineError::BackupFailed)?;

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let name = format!("{BACKUP_PREFIX}{stamp}{BACKUP_EXT}");
    let path = paths.backup_dir.join(&name);

    fs::copy(live, &path).map_err(EngineError::BackupFailed)?;
    reporter.log(&format!("Backup created: {}", path.display()));

    Ok(BackupRecord { name, path })
}

/// List backups, newest first. Fixed-width stamps make the filename sort
/// a timestamp sort. Tolerates records without the `.txt` suffix (written
/// by older versions). An absent store lists as empty.
pub fn list_backups(paths: &Paths) -> Result<Vec<BackupRecord>> {
    if !paths.backup_dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(&paths.backup_dir).map_err(EngineError::BackupFailed)?;
    let mut records: Vec<BackupRecord> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(BACKUP_PREFIX) {
                Some(BackupRecord {
                    path: entry.path(),
                    name,
                })
            } else {
                None
            }
        })
        .collect();

    records.sort_by(|a, b| b.name.cmp(&a.name));
    Ok(records)
}

/// Resolve a backup id (full filename or bare `YYYYMMDD_HHMMSS` stamp).
pub fn find_backup(paths: &Paths, id: &str) -> Result<BackupRecord> {
    let records = list_backups(paths)?;
    if records.is_empty() {
        return Err(EngineError::NoBackupsFound);
    }

    records
        .into_iter()
        .find(|r| r.name == id || r.stamp() == id)
        .ok_or_else(|| EngineError::BackupFileMissing(paths.backup_dir.join(id)))
}

/// Restore the newest backup onto the live path.
pub fn restore_latest(paths: &Paths, live: &Path, reporter: &dyn Reporter) -> Result<BackupRecord> {
    let records = list_backups(paths)?;
    let record = records.into_iter().next().ok_or(EngineError::NoBackupsFound)?;
    reporter.log(&format!("Using latest backup: {}", record.name));
    restore_record(&record, live, reporter)?;
    Ok(record)
}

/// Restore a chosen backup onto the live path via the same temp-mediated
/// safe replace as the apply path. Requires elevated privileges.
pub fn restore_record(record: &BackupRecord, live: &Path, reporter: &dyn Reporter) -> Result<()> {
    reporter.log("Checking privileges...");
    if !platform::is_elevated() {
        return Err(EngineError::PermissionRequired);
    }

    if !record.path.is_file() {
        return Err(EngineError::BackupFileMissing(record.path.clone()));
    }

    reporter.log(&format!("Restoring from {}...", record.path.display()));
    let content = fs::read_to_string(&record.path).map_err(EngineError::ReadFailed)?;

    let temp = writer::write_temp("hostpatch_restore", &content)?;
    debug!(temp = %temp.display(), "restore temp file written");

    let replaced = writer::replace_live(&temp, live, &content);
    writer::cleanup_temp(&temp, reporter);
    replaced?;

    reporter.log(&format!("Hosts file restored to {}", live.display()));
    reporter.log(writer::dns_flush_hint());
    Ok(())
}
