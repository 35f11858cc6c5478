//! Shared test helpers.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

use hostpatch::report::Reporter;

/// Create a temp directory for use as HOSTPATCH_HOME.
/// Uses current dir (workspace) so sandbox allows full access.
pub fn temp_home() -> TempDir {
    tempfile::Builder::new()
        .prefix("hostpatch_test_")
        .tempdir_in(std::env::current_dir().unwrap_or_else(|_| Path::new(".").into()))
        .expect("temp dir")
}

/// Reporter that collects log lines and progress hints for assertions.
#[derive(Default)]
pub struct CollectingReporter {
    pub lines: Mutex<Vec<String>>,
    pub progress: Mutex<Vec<u8>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn joined(&self) -> String {
        self.lines.lock().unwrap().join("\n")
    }
}

impl Reporter for CollectingReporter {
    fn log(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_string());
    }

    fn progress(&self, percent: u8) {
        self.progress.lock().unwrap().push(percent);
    }
}

/// Spawn a minimal HTTP server that answers every request with `body`.
/// Returns the base URL.
pub async fn serve_http(body: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                use tokio::io::{AsyncReadExt, AsyncWriteExt};
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });
    format!("http://{addr}/")
}

/// A URL whose connection is refused (port bound, then released).
pub async fn refused_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}

/// Strip `Updated at ...` timestamps so merge output can be compared
/// across runs.
pub fn mask_timestamps(text: &str) -> String {
    text.lines()
        .map(|line| match line.find(" - Updated at ") {
            Some(idx) => &line[..idx],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
