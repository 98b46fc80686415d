//! Integration Tests for the Upstream Client
//!
//! Runs `ApiClient` against a local axum server standing in for the remote API.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use loan_console::{
    cache::{CacheRegistry, CacheSettings, ListQuery},
    models::EntityKind,
    ApiClient, ConsoleError, PageSource,
};
use serde_json::{json, Value};

// == Helper Functions ==

async fn echo(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(json!({"auth": auth, "params": params}))
}

async fn applications(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let page = params.get("page").cloned().unwrap_or_default();
    Json(json!({
        "data": {
            "items": [{"loanId": format!("gl-{}", page), "customerName": "Kavya", "goldWeight": "18g"}],
            "total": 7
        }
    }))
}

async fn failing() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"success": false, "message": "database unavailable"})),
    )
}

async fn not_json() -> &'static str {
    "<html>gateway</html>"
}

/// Starts the stand-in API and returns its base URL (with an `/api` prefix).
async fn spawn_upstream() -> String {
    let api = Router::new()
        .route("/echo", get(echo))
        .route("/gold-loan/applications", get(applications))
        .route("/failing", get(failing))
        .route("/html", get(not_json));
    let app = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn client(base_url: &str) -> ApiClient {
    ApiClient::builder()
        .base_url(base_url)
        .auth_token("secret-token")
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

// == Client Tests ==

#[tokio::test]
async fn test_get_json_sends_query_and_bearer_token() {
    let base = spawn_upstream().await;
    let client = client(&base);

    let query = ListQuery::new(3, 25, Some("asha rao".into()), Some("approved".into()));
    let body = client.get_json("echo", &query.query_pairs()).await.unwrap();

    assert_eq!(body["auth"], "Bearer secret-token");
    assert_eq!(body["params"]["page"], "3");
    assert_eq!(body["params"]["limit"], "25");
    assert_eq!(body["params"]["search"], "asha rao");
    assert_eq!(body["params"]["status"], "approved");
}

#[tokio::test]
async fn test_non_success_status_is_upstream_error() {
    let base = spawn_upstream().await;

    let result = client(&base).get_json("failing", &[]).await;

    match result {
        Err(ConsoleError::Upstream { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let base = spawn_upstream().await;

    let result = client(&base).get_json("html", &[]).await;

    assert!(matches!(result, Err(ConsoleError::Decode(_))));
}

#[tokio::test]
async fn test_unknown_path_is_upstream_not_found() {
    let base = spawn_upstream().await;

    let result = client(&base).get_json("nowhere", &[]).await;

    assert!(matches!(
        result,
        Err(ConsoleError::Upstream { status: 404, .. })
    ));
}

// == End-to-End ==

#[tokio::test]
async fn test_registry_reads_through_real_client() {
    let base = spawn_upstream().await;
    let settings = CacheSettings {
        refresh_interval: Duration::ZERO,
        ..CacheSettings::default()
    };
    let registry = CacheRegistry::new(Arc::new(client(&base)), settings);
    let store = registry.store(EntityKind::GoldLoan);

    let query = ListQuery::new(2, 5, None, None);
    let outcome = store.read(&query).await.unwrap();
    let (page, _) = outcome.into_parts();

    assert_eq!(page.total, 7);
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.records[0].id, "gl-2");
    assert_eq!(page.records[0].name.as_deref(), Some("Kavya"));
    assert_eq!(page.records[0].headline.as_deref(), Some("18g"));

    let cached = store.get(&query).await.unwrap();
    assert_eq!(cached, page);
    assert_eq!(store.stats().await.fetches, 1);
}
