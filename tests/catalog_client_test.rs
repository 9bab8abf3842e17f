//! Catalog client against a mock HTTP server, through the instrumented
//! shared client.

use std::sync::Arc;

use serde_json::json;
use toolcat::adapters::mock::InMemoryPreferences;
use toolcat::adapters::ReqwestHttpClient;
use toolcat::catalog::{CatalogClient, CatalogError, NewTool};
use toolcat::debug::{NetworkDebug, SharedClient};
use wiremock::matchers::{body_json, method, path, query_param_is_missing};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn catalog(origin: String, debug: bool) -> (NetworkDebug, CatalogClient<Arc<SharedClient>>) {
    let ctx = NetworkDebug::from_parts(debug, Arc::new(InMemoryPreferences::new()), 0);
    let shared = Arc::new(SharedClient::new(Arc::new(ReqwestHttpClient::with_origin(
        origin,
    ))));
    shared.install(&ctx);
    (ctx, CatalogClient::new(shared))
}

/// An origin nothing is listening on.
fn closed_origin() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn test_list_tools_normalizes_categories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Email", "short_description": "Mail", "link": "https://mail", "categories": ["Kommunikation"]},
            {"name": "Backup", "link": "https://backup", "category": ["Drift", "Sikkerhed"]},
            {"name": "VPN", "link": "https://vpn", "category": "Netværk"}
        ])))
        .mount(&server)
        .await;

    let (ctx, client) = catalog(server.uri(), false);
    let tools = client.list_tools().await.unwrap();

    assert_eq!(tools.len(), 3);
    assert_eq!(tools[0].categories, vec!["Kommunikation"]);
    assert_eq!(tools[1].categories, vec!["Drift", "Sikkerhed"]);
    assert_eq!(tools[2].categories, vec!["Netværk"]);

    let entries = ctx.log.snapshot();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, Some(200));
    assert!(entries[0].response_snippet.as_deref().unwrap().starts_with('['));
}

#[tokio::test]
async fn test_debug_tag_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kategorier"))
        .respond_with(|req: &Request| {
            let tagged = req.url.query_pairs().filter(|(k, _)| k == "dbg").count();
            ResponseTemplate::new(200).set_body_json(json!([format!("tags:{}", tagged)]))
        })
        .mount(&server)
        .await;

    let (ctx, client) = catalog(server.uri(), true);
    let categories = client.list_categories().await.unwrap();
    assert_eq!(categories, vec!["tags:1"]);

    let entries = ctx.log.snapshot();
    assert!(entries[0].url.ends_with(&format!("dbg={}", entries[0].id)));
}

#[tokio::test]
async fn test_no_tag_when_debug_off() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kategorier"))
        .and(query_param_is_missing("dbg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Drift"])))
        .mount(&server)
        .await;

    let (_ctx, client) = catalog(server.uri(), false);
    assert_eq!(client.list_categories().await.unwrap(), vec!["Drift"]);
}

#[tokio::test]
async fn test_create_tool_posts_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tools"))
        .and(body_json(json!({
            "name": "Wiki",
            "short_description": "Docs",
            "link": "https://wiki",
            "category": ["Viden"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, client) = catalog(server.uri(), false);
    let tool = NewTool::new("Wiki", "Docs", "https://wiki").with_category("Viden");
    client.create_tool(&tool).await.unwrap();

    assert_eq!(ctx.log.snapshot()[0].method, "POST");
}

#[tokio::test]
async fn test_duplicate_category_is_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/kategorier"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"message": "duplicate"})))
        .mount(&server)
        .await;

    let (ctx, client) = catalog(server.uri(), false);
    let err = client.create_category("Drift").await.unwrap_err();
    assert!(matches!(err, CatalogError::Conflict(name) if name == "Drift"));

    // the failed status is logged as a completed call
    let entries = ctx.log.snapshot();
    assert_eq!(entries[0].status, Some(409));
    assert!(entries[0].error.is_none());
}

#[tokio::test]
async fn test_delete_tool_path_is_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/tools/Email%20Platform"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (_ctx, client) = catalog(server.uri(), false);
    client.delete_tool("Email Platform").await.unwrap();
}

#[tokio::test]
async fn test_unreachable_server_logged_as_failure() {
    let (ctx, client) = catalog(closed_origin(), false);

    let err = client.list_tools().await.unwrap_err();
    assert!(err.is_connectivity());

    let entries = ctx.log.snapshot();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].status.is_none());
    let error = entries[0].error.as_ref().unwrap();
    assert_eq!(error.name, "ConnectionFailed");
    assert!(entries[0].context.is_some());
}
