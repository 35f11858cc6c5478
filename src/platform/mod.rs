//! Platform abstraction: hosts file location and privilege check.

use std::path::PathBuf;

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

/// Path to the system hosts file.
/// If HOSTPATCH_HOSTS_FILE is set (e.g. in tests), uses that path.
pub fn hosts_path() -> PathBuf {
    if let Ok(path) = std::env::var("HOSTPATCH_HOSTS_FILE") {
        return PathBuf::from(path);
    }
    #[cfg(windows)]
    return PathBuf::from(r"C:\Windows\System32\drivers\etc\hosts");

    #[cfg(not(windows))]
    return PathBuf::from("/etc/hosts");
}

/// Whether the process holds the elevated rights needed to modify the
/// hosts file. HOSTPATCH_ASSUME_ELEVATED=0|1 overrides (tests).
pub fn is_elevated() -> bool {
    match std::env::var("HOSTPATCH_ASSUME_ELEVATED").as_deref() {
        Ok("1") => return true,
        Ok("0") => return false,
        _ => {}
    }
    #[cfg(unix)]
    return unix::is_elevated();

    #[cfg(windows)]
    return windows::is_elevated();
}
