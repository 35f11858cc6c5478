//! Unix (macOS, Linux) platform implementations.

/// Root check via effective uid.
pub fn is_elevated() -> bool {
    unsafe { libc::geteuid() == 0 }
}
