use repo_baseline::assessment::{no_binaries_in_repo, ControlResult};
use repo_baseline::cancel::CancelSignal;
use repo_baseline::config::{FailurePolicy, ScanConfig};
use repo_baseline::scanner::RepoScanner;
use serde_json::json;

use crate::integration::support::{RecordedRequest, StubResponse, StubServer};

fn tree_response() -> serde_json::Value {
    json!({ "data": { "repository": { "object": { "entries": [
        { "name": "app.jar", "type": "blob", "path": "app.jar",
          "object": { "isBinary": true, "isTruncated": false } },
        { "name": "README.md", "type": "blob", "path": "README.md",
          "object": { "isBinary": false, "isTruncated": false } },
        { "name": "docs", "type": "tree", "path": "docs",
          "object": { "entries": [
              { "name": "huge.md", "type": "blob", "path": "docs/huge.md",
                "object": { "isBinary": null, "isTruncated": true } },
              { "name": "data", "type": "tree", "path": "docs/data",
                "object": { "entries": [
                    { "name": "blob.dat", "type": "blob", "path": "docs/data/blob.dat",
                      "object": { "isBinary": null, "isTruncated": true } },
                    { "name": "run me", "type": "blob", "path": "docs/data/run me",
                      "object": { "isBinary": null, "isTruncated": true } },
                    { "name": "deeper", "type": "tree", "path": "docs/data/deeper",
                      "object": {} }
                ] } }
          ] } }
    ] } } } })
}

fn github(request: &RecordedRequest, broken_path: Option<&'static str>) -> StubResponse {
    if request.method == "POST" && request.path == "/graphql" {
        if request.body.contains("defaultBranchRef") {
            return StubResponse::json(json!({
                "data": { "repository": { "defaultBranchRef": { "name": "main" } } }
            }));
        }
        return StubResponse::json(tree_response());
    }
    if Some(request.path.as_str()) == broken_path {
        return StubResponse::new(500, Vec::new());
    }
    match request.path.as_str() {
        "/raw/o/r/main/docs/data/blob.dat" => StubResponse::new(206, vec![0x7f, b'E', b'L', b'F', 0x02, 0x01, 0x00]),
        "/raw/o/r/main/docs/data/run%20me" => StubResponse::new(206, "#!/bin/sh\nexit 0\n"),
        _ => StubResponse::new(404, Vec::new()),
    }
}

fn config(server: &StubServer) -> ScanConfig {
    ScanConfig {
        owner: "o".to_string(),
        repo: "r".to_string(),
        graphql_url: format!("{}/graphql", server.base_url),
        raw_content_url: format!("{}/raw", server.base_url),
        ..ScanConfig::default()
    }
}

#[tokio::test]
async fn scan_flags_hinted_and_sniffed_binaries() {
    let server = StubServer::start(|req| github(req, None)).await;
    let scanner = RepoScanner::new(config(&server), CancelSignal::never()).unwrap();

    let found = scanner.suspected_binaries().await.unwrap();
    assert_eq!(found, vec!["app.jar", "blob.dat"]);

    let raw_paths: Vec<String> = server
        .paths()
        .into_iter()
        .filter(|p| p.starts_with("/raw/"))
        .collect();
    assert_eq!(
        raw_paths,
        vec!["/raw/o/r/main/docs/data/blob.dat", "/raw/o/r/main/docs/data/run%20me"]
    );

    let verdict = no_binaries_in_repo(Ok(found));
    assert_eq!(verdict.result, ControlResult::Failed);
    assert!(verdict.message.contains("app.jar, blob.dat"));
}

#[tokio::test]
async fn configured_branch_skips_default_branch_query() {
    let server = StubServer::start(|req| github(req, None)).await;
    let mut config = config(&server);
    config.branch = Some("main".to_string());
    let scanner = RepoScanner::new(config, CancelSignal::never()).unwrap();

    scanner.suspected_binaries().await.unwrap();
    let graphql_calls = server
        .requests()
        .into_iter()
        .filter(|r| r.path == "/graphql")
        .count();
    assert_eq!(graphql_calls, 1);
}

#[tokio::test]
async fn fetch_failure_makes_the_check_unknown() {
    let server = StubServer::start(|req| github(req, Some("/raw/o/r/main/docs/data/blob.dat"))).await;
    let scanner = RepoScanner::new(config(&server), CancelSignal::never()).unwrap();

    let outcome = scanner.suspected_binaries().await;
    assert!(outcome.is_err());
    // Fail-fast: the entry after the broken one is never fetched.
    assert!(!server.paths().iter().any(|p| p.ends_with("run%20me")));

    let verdict = no_binaries_in_repo(outcome);
    assert_eq!(verdict.result, ControlResult::Unknown);
}

#[tokio::test]
async fn log_and_continue_reports_remaining_binaries() {
    let server = StubServer::start(|req| github(req, Some("/raw/o/r/main/docs/data/blob.dat"))).await;
    let mut config = config(&server);
    config.failure_policy = FailurePolicy::LogAndContinue;
    let scanner = RepoScanner::new(config, CancelSignal::never()).unwrap();

    let found = scanner.suspected_binaries().await.unwrap();
    assert_eq!(found, vec!["app.jar"]);
    assert!(server.paths().iter().any(|p| p.ends_with("run%20me")));
}

#[tokio::test]
async fn classify_path_reports_evidence() {
    let server = StubServer::start(|req| github(req, None)).await;
    let mut config = config(&server);
    config.branch = Some("main".to_string());
    let scanner = RepoScanner::new(config, CancelSignal::never()).unwrap();

    let (binary, evidence) = scanner
        .classify_path("docs/data/blob.dat", None, true)
        .await
        .unwrap();
    assert!(binary);
    assert_eq!(evidence.as_str(), "content-sniff");
    assert!(server.paths().iter().all(|p| p != "/graphql"));
}
