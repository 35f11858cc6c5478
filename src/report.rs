//! Operation reporting: log sink and advisory progress.

/// Sink for the chronological, user-visible trail of one operation.
///
/// Progress is an advisory 0-100 hint and never affects control flow.
pub trait Reporter: Send + Sync {
    /// Emit one log line.
    fn log(&self, message: &str);
    /// Advisory progress hint, monotonically increasing 0-100.
    fn progress(&self, percent: u8);
}

/// Reporter that prints timestamped lines to stdout.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn log(&self, message: &str) {
        let ts = chrono::Local::now().format("%H:%M:%S");
        println!("[{ts}] {message}");
    }

    fn progress(&self, _percent: u8) {}
}

/// Reporter that discards everything (library callers, tests).
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn log(&self, _message: &str) {}
    fn progress(&self, _percent: u8) {}
}
