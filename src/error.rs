//! Error types for engine operations.

use std::path::PathBuf;
use thiserror::Error;

/// Engine error type.
///
/// Absence of rules is not an error: an empty [`crate::rules::RuleSet`]
/// renders as the not-found marker line instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Every configured mirror source failed to deliver usable content.
    #[error("all sources failed")]
    AllSourcesFailed,

    /// Elevated privileges are required to modify the hosts file.
    #[error("elevated privileges required to modify the hosts file; re-run as administrator/root")]
    PermissionRequired,

    /// Backing up the live hosts file failed; the live file was not touched.
    #[error("backup failed: {0}")]
    BackupFailed(#[source] std::io::Error),

    /// Reading the live hosts file failed.
    #[error("failed to read hosts file: {0}")]
    ReadFailed(#[source] std::io::Error),

    /// Writing the temporary file failed; the live file was not touched.
    #[error("failed to write temporary file: {0}")]
    WriteFailed(#[source] std::io::Error),

    /// Replacing the live hosts file failed.
    #[error("failed to replace hosts file: {detail}")]
    ReplaceFailed {
        detail: String,
        /// Whether the live file may have been left modified.
        live_modified: bool,
    },

    /// The backup store is empty or absent.
    #[error("no backups found")]
    NoBackupsFound,

    /// A specifically named backup no longer exists on disk.
    #[error("backup file missing: {0}")]
    BackupFileMissing(PathBuf),

    /// Caller-supplied input (e.g. a rules file) is malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl EngineError {
    /// Whether the live hosts file may have been modified by the failed
    /// operation. False for every kind except a partial replace.
    pub fn live_file_modified(&self) -> bool {
        matches!(
            self,
            EngineError::ReplaceFailed {
                live_modified: true,
                ..
            }
        )
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
