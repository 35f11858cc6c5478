//! Windows platform implementations.

/// Administrator check: probe the hosts file for write access.
/// Opening for append fails with ERROR_ACCESS_DENIED when not elevated.
pub fn is_elevated() -> bool {
    let path = super::hosts_path();
    std::fs::OpenOptions::new()
        .append(true)
        .open(&path)
        .is_ok()
}
