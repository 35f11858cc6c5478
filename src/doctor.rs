//! Doctor command: environment checks.

use std::path::Path;

use clap::ValueEnum;

use crate::backup;
use crate::config::Paths;
use crate::merge::has_managed_block;
use crate::platform;
use crate::target::Target;

/// Result of a single check.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckResult {
    pub ok: bool,
    pub message: String,
}

/// Run all doctor checks.
pub fn run_checks(paths: &Paths, live: &Path) -> Vec<CheckResult> {
    let mut results = Vec::new();

    // 1. Hosts file exists and is readable
    let content = match std::fs::read_to_string(live) {
        Ok(content) => {
            results.push(CheckResult {
                ok: true,
                message: format!(
                    "Hosts file {} readable ({} lines)",
                    live.display(),
                    content.lines().count()
                ),
            });
            Some(content)
        }
        Err(e) => {
            results.push(CheckResult {
                ok: false,
                message: format!("Cannot read hosts file {}: {e}", live.display()),
            });
            None
        }
    };

    // 2. Elevation status
    if platform::is_elevated() {
        results.push(CheckResult {
            ok: true,
            message: "Running with elevated privileges".to_string(),
        });
    } else {
        results.push(CheckResult {
            ok: false,
            message: "Not elevated; 'apply' and 'restore' will fail. Re-run as administrator/root."
                .to_string(),
        });
    }

    // 3. Backup store
    match backup::list_backups(paths) {
        Ok(records) if records.is_empty() => {
            results.push(CheckResult {
                ok: true,
                message: format!("Backup store {} is empty", paths.backup_dir.display()),
            });
        }
        Ok(records) => {
            results.push(CheckResult {
                ok: true,
                message: format!(
                    "{} backup(s) in {}, newest {}",
                    records.len(),
                    paths.backup_dir.display(),
                    records[0].name
                ),
            });
        }
        Err(e) => {
            results.push(CheckResult {
                ok: false,
                message: format!("Cannot list backup store: {e}"),
            });
        }
    }

    // 4. Managed blocks per target
    if let Some(content) = content {
        for target in Target::value_variants() {
            let present = has_managed_block(&content, *target);
            results.push(CheckResult {
                ok: true,
                message: if present {
                    format!("[{target}] managed block present")
                } else {
                    format!("[{target}] no managed block; run 'hostpatch apply --target {}'",
                        target.to_possible_value().map(|v| v.get_name().to_string()).unwrap_or_default())
                },
            });
        }
    }

    results
}
