use repo_baseline::error::ApiError;
use repo_baseline::github::GraphqlClient;
use serde_json::json;

use crate::integration::support::{StubResponse, StubServer};

fn client(server: &StubServer, token: Option<&str>) -> GraphqlClient {
    GraphqlClient::new(
        reqwest::Client::new(),
        format!("{}/graphql", server.base_url),
        token.map(str::to_string),
    )
}

#[tokio::test]
async fn default_branch_is_resolved() {
    let server = StubServer::start(|_| {
        StubResponse::json(json!({
            "data": { "repository": { "defaultBranchRef": { "name": "trunk" } } }
        }))
    })
    .await;

    let branch = client(&server, Some("tok"))
        .default_branch("octo", "hello")
        .await
        .unwrap();
    assert_eq!(branch, "trunk");

    let request = &server.requests()[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/graphql");
    assert_eq!(request.header("authorization"), Some("bearer tok"));
    let body = request.json();
    assert_eq!(body["variables"]["owner"], "octo");
    assert_eq!(body["variables"]["name"], "hello");
}

#[tokio::test]
async fn tree_query_uses_branch_expression_and_decodes_levels() {
    let server = StubServer::start(|_| {
        StubResponse::json(json!({
            "data": { "repository": { "object": { "entries": [
                { "name": "README.md", "type": "blob", "path": "README.md",
                  "object": { "isBinary": false, "isTruncated": false } },
                { "name": "gradle", "type": "tree", "path": "gradle",
                  "object": { "entries": [
                      { "name": "wrapper.jar", "type": "blob", "path": "gradle/wrapper.jar",
                        "object": { "isBinary": true, "isTruncated": false } }
                  ] } }
            ] } } }
        }))
    })
    .await;

    let tree = client(&server, None)
        .fetch_repo_tree("octo", "hello", "main")
        .await
        .unwrap()
        .expect("tree should be present");
    assert_eq!(tree.entries.len(), 2);
    assert_eq!(tree.entries[1].children().unwrap()[0].name, "wrapper.jar");

    let request = &server.requests()[0];
    assert_eq!(request.header("authorization"), None);
    let body = request.json();
    assert_eq!(body["variables"]["branch"], "main:");
    assert!(body["query"].as_str().unwrap().contains("isTruncated"));
}

#[tokio::test]
async fn unresolved_branch_yields_no_tree() {
    let server = StubServer::start(|_| {
        StubResponse::json(json!({ "data": { "repository": { "object": null } } }))
    })
    .await;
    let tree = client(&server, None)
        .fetch_repo_tree("octo", "hello", "missing")
        .await
        .unwrap();
    assert!(tree.is_none());
}

#[tokio::test]
async fn graphql_errors_are_reported() {
    let server = StubServer::start(|_| {
        StubResponse::json(json!({
            "data": null,
            "errors": [
                { "message": "Could not resolve to a Repository with the name 'octo/nope'." }
            ]
        }))
    })
    .await;
    let err = client(&server, None)
        .fetch_repo_tree("octo", "nope", "main")
        .await
        .unwrap_err();
    match err {
        ApiError::GraphqlError(message) => assert!(message.contains("Could not resolve")),
        other => panic!("expected GraphqlError, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_is_distinguished() {
    let server = StubServer::start(|_| StubResponse::new(401, "{}")).await;
    let err = client(&server, Some("bad"))
        .default_branch("octo", "hello")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
}

#[tokio::test]
async fn missing_repository_is_an_error() {
    let server = StubServer::start(|_| {
        StubResponse::json(json!({ "data": { "repository": null } }))
    })
    .await;
    let err = client(&server, None)
        .default_branch("octo", "ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::GraphqlError(_)));
}
