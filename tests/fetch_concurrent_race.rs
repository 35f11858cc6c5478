//! Concurrent fetch settles all sources, then prefers the lowest index.

mod common;

use std::time::Duration;

use hostpatch::error::EngineError;
use hostpatch::fetch::{self, FetchOptions, FetchStrategy};
use hostpatch::target::Target;

fn opts() -> FetchOptions {
    FetchOptions {
        timeout: Duration::from_secs(5),
        strategy: FetchStrategy::Concurrent,
    }
}

#[tokio::test]
async fn index_zero_is_preferred_when_all_succeed() {
    let first = common::serve_http("1.1.1.1 github.com\n").await;
    let second = common::serve_http("2.2.2.2 github.com\n").await;
    let sources = [first.as_str(), second.as_str()];

    let reporter = common::CollectingReporter::new();
    let (i, body) = fetch::fetch_concurrent(&sources, &opts(), &reporter)
        .await
        .unwrap();

    assert_eq!(i, 0);
    assert_eq!(body, "1.1.1.1 github.com\n");
}

#[tokio::test]
async fn falls_back_to_next_index_when_first_fails() {
    let bad = common::refused_url().await;
    let good = common::serve_http("2.2.2.2 github.com\n").await;
    let sources = [bad.as_str(), good.as_str()];

    let reporter = common::CollectingReporter::new();
    let (i, body) = fetch::fetch_concurrent(&sources, &opts(), &reporter)
        .await
        .unwrap();

    assert_eq!(i, 1);
    assert_eq!(body, "2.2.2.2 github.com\n");
}

#[tokio::test]
async fn all_failures_surface_as_all_sources_failed() {
    let bad1 = common::refused_url().await;
    let bad2 = common::refused_url().await;
    let sources = [bad1.as_str(), bad2.as_str()];

    let reporter = common::CollectingReporter::new();
    let err = fetch::fetch_concurrent(&sources, &opts(), &reporter)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::AllSourcesFailed));
}

#[tokio::test]
async fn concurrent_download_extracts_from_winner() {
    let first = common::serve_http("1.2.3.4 github.com\n9.9.9.9 example.org\n").await;
    let second = common::serve_http("5.6.7.8 github.com\n").await;
    let sources = [first.as_str(), second.as_str()];

    let reporter = common::CollectingReporter::new();
    let download = fetch::download_from(&sources, Target::Github, &opts(), &reporter)
        .await
        .unwrap();

    assert_eq!(download.rules.lines, vec!["1.2.3.4 github.com"]);
    assert_eq!(download.source, first);
}
