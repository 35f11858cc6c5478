//! Safe hosts-file mutation: the apply path and the replace primitive.
//!
//! Apply runs backup -> read -> merge -> temp write -> replace -> cleanup,
//! gated on elevated privileges. The live file is never touched before a
//! successful backup, and the replace is copy-then-verify so a partial
//! replacement is detected and reported rather than presumed intact.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::backup;
use crate::config::Paths;
use crate::error::{EngineError, Result};
use crate::merge::merge_rules;
use crate::platform;
use crate::report::Reporter;
use crate::target::Target;

/// Outcome of a successful apply.
#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    pub backup_path: PathBuf,
    pub hosts_path: PathBuf,
}

/// Platform-appropriate DNS cache flush suggestion. Logged, never executed.
pub fn dns_flush_hint() -> &'static str {
    #[cfg(windows)]
    return "Tip: run 'ipconfig /flushdns' to refresh the DNS cache";

    #[cfg(target_os = "macos")]
    return "Tip: run 'sudo dscacheutil -flushcache' to refresh the DNS cache";

    #[cfg(not(any(windows, target_os = "macos")))]
    return "Tip: restart your resolver (e.g. systemd-resolved) if stale entries persist";
}

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Write `content` to a file in the process temp directory, UTF-8 with
/// `\n` line endings. Names carry the pid and a sequence number so
/// concurrent callers cannot clobber each other's temp file.
pub fn write_temp(prefix: &str, content: &str) -> Result<PathBuf> {
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let name = format!("{prefix}.{}.{seq}.tmp", std::process::id());
    let path = std::env::temp_dir().join(name);
    fs::write(&path, content.as_bytes()).map_err(EngineError::WriteFailed)?;
    Ok(path)
}

/// Copy `src` over `live` and verify the result.
///
/// A plain copy (not rename) tolerates cross-filesystem temp dirs and keeps
/// the destination's permissions and metadata. After the copy the live file
/// is read back and compared against `expected`; any error or mismatch is
/// reported with an honest live-modified flag derived from comparing the
/// destination against its pre-replace content.
pub fn replace_live(src: &Path, live: &Path, expected: &str) -> Result<()> {
    let prior = fs::read(live).ok();

    if let Err(e) = fs::copy(src, live) {
        let live_modified = match fs::read(live) {
            Ok(now) => prior.map(|p| p != now).unwrap_or(true),
            Err(_) => true,
        };
        return Err(EngineError::ReplaceFailed {
            detail: e.to_string(),
            live_modified,
        });
    }

    match fs::read(live) {
        Ok(now) if now == expected.as_bytes() => Ok(()),
        Ok(_) => Err(EngineError::ReplaceFailed {
            detail: "verification after copy found unexpected content".to_string(),
            live_modified: true,
        }),
        Err(e) => Err(EngineError::ReplaceFailed {
            detail: format!("verification read failed: {e}"),
            live_modified: true,
        }),
    }
}

/// Best-effort temp file removal. The operation is already complete when
/// this runs, so failure is logged and swallowed.
pub fn cleanup_temp(path: &Path, reporter: &dyn Reporter) {
    if let Err(e) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "could not remove temp file");
        reporter.log(&format!(
            "Warning: could not remove temp file {}: {e}",
            path.display()
        ));
    }
}

/// Apply `rules_text` to the live hosts file as the managed block for
/// `target`. Backup-first; the live file is untouched on every failure
/// except a partially failed replace, which the error reports.
pub fn apply(
    paths: &Paths,
    live: &Path,
    target: Target,
    rules_text: &str,
    reporter: &dyn Reporter,
) -> Result<ApplyOutcome> {
    reporter.log("Checking privileges...");
    if !platform::is_elevated() {
        return Err(EngineError::PermissionRequired);
    }

    reporter.log("Creating backup...");
    let record = backup::create_backup(paths, live, reporter)?;

    reporter.log("Reading current hosts file...");
    let current = fs::read_to_string(live).map_err(EngineError::ReadFailed)?;

    reporter.log("Merging rules...");
    let timestamp = chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    let merged = merge_rules(&current, rules_text, target, &timestamp);

    reporter.log("Writing new hosts file...");
    let temp = write_temp("hostpatch_hosts", &merged)?;
    debug!(temp = %temp.display(), "temp file written");

    let replaced = replace_live(&temp, live, &merged);
    cleanup_temp(&temp, reporter);
    replaced?;

    reporter.log(&format!("{target} rules applied to {}", live.display()));
    reporter.log(dns_flush_hint());

    Ok(ApplyOutcome {
        backup_path: record.path,
        hosts_path: live.to_path_buf(),
    })
}
