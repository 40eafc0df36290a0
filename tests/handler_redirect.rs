mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_redirect_success() {
    let (server, store) = common::memory_server();
    common::create_test_link(&store, "redirect1", "https://example.com/target").await;

    let response = server.get("/redirect1").await;

    assert_eq!(response.status_code(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_counts_clicks() {
    let (server, store) = common::memory_server();
    common::create_test_link(&store, "clickme", "https://example.com").await;

    for _ in 0..3 {
        server.get("/clickme").await;
    }

    let stats = server.get("/stats/clickme").await;
    assert_eq!(stats.json::<serde_json::Value>()["clicks"], 3);
}

#[tokio::test]
async fn test_redirect_digit_only_code_is_looked_up() {
    let (server, store) = common::memory_server();
    common::create_test_link(&store, "12345", "https://example.com/numeric").await;

    let response = server.get("/12345").await;

    assert_eq!(response.status_code(), StatusCode::MOVED_PERMANENTLY);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, _store) = common::memory_server();

    let response = server.get("/notfound").await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "not_found"
    );
}

#[tokio::test]
async fn test_redirect_code_too_short() {
    let (server, _store) = common::memory_server();

    let response = server.get("/ab").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_redirect_code_not_alphanumeric() {
    let (server, _store) = common::memory_server();

    let response = server.get("/a!b").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_redirect_store_unavailable() {
    let server = common::unavailable_server();

    let response = server.get("/abc123").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_redirect_invalid_format_checked_before_store() {
    let server = common::unavailable_server();

    let response = server.get("/ab").await;

    response.assert_status_bad_request();
}
