//! Mirror-source fetching and the download operation.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{EngineError, Result};
use crate::report::Reporter;
use crate::rules::{extract_rules, RuleSet};
use crate::target::Target;

/// How the mirror list is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Try sources in order, stop at the first success.
    Sequential,
    /// Race all sources, prefer the lowest index once all have settled.
    Concurrent,
}

/// Fetch behaviour knobs.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    pub strategy: FetchStrategy,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            strategy: FetchStrategy::Sequential,
        }
    }
}

/// Result of a successful download: extracted rules and the source used.
#[derive(Debug, Clone)]
pub struct Download {
    pub rules: RuleSet,
    pub source: String,
}

/// One source's failure, for logging.
struct FetchFailure {
    class: &'static str,
    detail: String,
}

/// Host part of a source URL, for log lines.
fn host_of(url: &str) -> &str {
    url.split("//")
        .nth(1)
        .and_then(|rest| rest.split('/').next())
        .unwrap_or(url)
}

fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| {
            warn!(error = %e, "failed to build HTTP client");
            EngineError::AllSourcesFailed
        })
}

async fn fetch_source(
    client: &reqwest::Client,
    url: &str,
) -> std::result::Result<String, FetchFailure> {
    let response = client.get(url).send().await.map_err(|e| {
        let class = if e.is_timeout() {
            "timeout"
        } else if e.is_connect() {
            "connection error"
        } else {
            "request error"
        };
        FetchFailure {
            class,
            detail: e.to_string(),
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchFailure {
            class: "request error",
            detail: format!("HTTP status {status}"),
        });
    }

    response.text().await.map_err(|e| FetchFailure {
        class: "request error",
        detail: e.to_string(),
    })
}

/// Fetch the body of the first source that succeeds, in order.
/// Returns the winning source index and the body.
pub async fn fetch_sequential(
    sources: &[&str],
    opts: &FetchOptions,
    reporter: &dyn Reporter,
) -> Result<(usize, String)> {
    let client = build_client(opts.timeout)?;

    for (i, source) in sources.iter().enumerate() {
        reporter.log(&format!("Fetching from {}...", host_of(source)));
        reporter.progress((20 + i * 20).min(80) as u8);
        match fetch_source(&client, source).await {
            Ok(body) => return Ok((i, body)),
            Err(f) => {
                warn!(source, class = f.class, detail = %f.detail, "source failed");
                reporter.log(&format!("{source} failed ({}): {}", f.class, f.detail));
            }
        }
    }

    Err(EngineError::AllSourcesFailed)
}

/// Race all sources; once every request has settled (success or timeout),
/// prefer the result at index 0, else the first available by index order.
/// An overall deadline of twice the per-request timeout bounds the race.
pub async fn fetch_concurrent(
    sources: &[&str],
    opts: &FetchOptions,
    reporter: &dyn Reporter,
) -> Result<(usize, String)> {
    let client = build_client(opts.timeout)?;

    let mut handles = Vec::with_capacity(sources.len());
    for (i, source) in sources.iter().enumerate() {
        reporter.log(&format!("Fetching from {}...", host_of(source)));
        reporter.progress((20 + i * 15).min(80) as u8);
        let client = client.clone();
        let url = source.to_string();
        handles.push(tokio::spawn(
            async move { fetch_source(&client, &url).await },
        ));
    }

    let collect = async {
        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => results.push(Err(FetchFailure {
                    class: "request error",
                    detail: format!("task failed: {e}"),
                })),
            }
        }
        results
    };

    let overall = opts.timeout * 2;
    let results = match tokio::time::timeout(overall, collect).await {
        Ok(results) => results,
        Err(_) => {
            warn!("overall fetch deadline of {}s exceeded", overall.as_secs());
            reporter.log("Fetch deadline exceeded");
            return Err(EngineError::AllSourcesFailed);
        }
    };

    for (source, result) in sources.iter().zip(&results) {
        if let Err(f) = result {
            warn!(source, class = f.class, detail = %f.detail, "source failed");
            reporter.log(&format!("{source} failed ({}): {}", f.class, f.detail));
        }
    }

    results
        .into_iter()
        .enumerate()
        .find_map(|(i, r)| r.ok().map(|body| (i, body)))
        .ok_or(EngineError::AllSourcesFailed)
}

/// Download and extract the rules for `target`.
///
/// Sequential mode treats a source whose body yields zero rules as a soft
/// failure and moves on; if every source fails to download the result is
/// `AllSourcesFailed`, while sources that download but yield nothing produce
/// an empty rule set (rendered as the not-found marker) - absence of rules
/// is a representable outcome, not an error.
pub async fn download_rules(
    target: Target,
    opts: &FetchOptions,
    reporter: &dyn Reporter,
) -> Result<Download> {
    download_from(target.sources(), target, opts, reporter).await
}

/// [`download_rules`] over an explicit source list.
pub async fn download_from(
    sources: &[&str],
    target: Target,
    opts: &FetchOptions,
    reporter: &dyn Reporter,
) -> Result<Download> {
    reporter.log(&format!("Connecting to {} rule sources...", target));
    reporter.progress(10);

    let download = match opts.strategy {
        FetchStrategy::Concurrent => {
            let (i, body) = fetch_concurrent(sources, opts, reporter).await?;
            debug!(source = sources[i], "concurrent fetch settled");
            Download {
                rules: extract_rules(&body, target),
                source: sources[i].to_string(),
            }
        }
        FetchStrategy::Sequential => {
            let client = build_client(opts.timeout)?;
            let mut empty_from: Option<usize> = None;

            for (i, source) in sources.iter().enumerate() {
                reporter.log(&format!("Fetching from {}...", host_of(source)));
                reporter.progress((20 + i * 20).min(80) as u8);
                match fetch_source(&client, source).await {
                    Ok(body) => {
                        let rules = extract_rules(&body, target);
                        if rules.is_empty() {
                            reporter.log("Downloaded content held no matching rules, trying next source...");
                            empty_from.get_or_insert(i);
                            continue;
                        }
                        reporter.progress(100);
                        return Ok(Download {
                            rules,
                            source: source.to_string(),
                        });
                    }
                    Err(f) => {
                        warn!(source, class = f.class, detail = %f.detail, "source failed");
                        reporter.log(&format!("{source} failed ({}): {}", f.class, f.detail));
                    }
                }
            }

            match empty_from {
                Some(i) => Download {
                    rules: RuleSet::default(),
                    source: sources[i].to_string(),
                },
                None => return Err(EngineError::AllSourcesFailed),
            }
        }
    };

    reporter.progress(100);
    Ok(download)
}
