//! Integration tests for the request core: bearer injection, the bounded
//! 401 refresh-and-replay transition, and error body normalization.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use auction_client::{ApiClient, ClientConfig, MemoryTokenStore, TokenStore};

/// Matches only requests that carry no Authorization header.
struct NoAuthHeader;

impl wiremock::Match for NoAuthHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

fn profile_body() -> serde_json::Value {
    json!({
        "id": 7,
        "username": "alice",
        "name": "Alice",
        "email": "alice@example.com",
        "balance": "250.00",
        "role": null
    })
}

fn client_with_store(server: &MockServer, store: Arc<MemoryTokenStore>) -> ApiClient {
    let config = ClientConfig {
        base_url: server.uri().into(),
        ..ClientConfig::default()
    }
    .with_token_store(store);
    ApiClient::new(config).expect("client should build")
}

fn anonymous_client(server: &MockServer) -> ApiClient {
    let config = ClientConfig { base_url: server.uri().into(), ..ClientConfig::default() };
    ApiClient::new(config).expect("client should build")
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryTokenStore::with_tokens("acc-1", "ref-1"));
    let client = client_with_store(&server, store);

    Mock::given(method("GET"))
        .and(path("/api/auth/me/"))
        .and(header("authorization", "Bearer acc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .expect(1)
        .mount(&server)
        .await;

    let me = client.me().await.expect("request should succeed");
    assert_eq!(me.username, "alice");
    assert_eq!(me.balance, 250.0);
}

#[tokio::test]
async fn test_anonymous_request_has_no_auth_header() {
    let server = MockServer::start().await;
    let client = anonymous_client(&server);

    Mock::given(method("GET"))
        .and(path("/api/lots/"))
        .and(NoAuthHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let lots = client.list_lots(None).await.expect("request should succeed");
    assert!(lots.is_empty());
}

#[tokio::test]
async fn test_401_refreshes_once_and_replays() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryTokenStore::with_tokens("stale", "ref-1"));
    let client = client_with_store(&server, store.clone());

    Mock::given(method("GET"))
        .and(path("/api/auth/me/"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "token expired"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Refresh must hit the dedicated endpoint with no auth header.
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .and(NoAuthHeader)
        .and(body_json(json!({"refresh": "ref-1"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access": "fresh", "refresh": "ref-2"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me/"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .expect(1)
        .mount(&server)
        .await;

    let me = client.me().await.expect("replay should succeed");
    assert_eq!(me.id, 7);

    // The new pair was persisted together.
    assert_eq!(store.access_token().as_deref(), Some("fresh"));
    assert_eq!(store.refresh_token().as_deref(), Some("ref-2"));
}

#[tokio::test]
async fn test_persistent_401_terminates_after_single_replay() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryTokenStore::with_tokens("acc", "ref"));
    let client = client_with_store(&server, store);

    // The protected endpoint never accepts the token, the refresh endpoint
    // always succeeds. The request must still stop after one replay.
    Mock::given(method("GET"))
        .and(path("/api/lots/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "no"})))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "a2", "refresh": "r2"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client.list_lots(None).await.expect_err("should surface the 401");
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_refresh_failure_propagates_original_401() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryTokenStore::with_tokens("acc", "ref"));
    let client = client_with_store(&server, store.clone());

    Mock::given(method("GET"))
        .and(path("/api/bets/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "token expired"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "refresh invalid"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client.list_bets().await.expect_err("should surface the 401");
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.message(), "token expired");

    // The stale pair stays in place; nothing was persisted.
    assert_eq!(store.access_token().as_deref(), Some("acc"));
    assert_eq!(store.refresh_token().as_deref(), Some("ref"));
}

#[tokio::test]
async fn test_401_without_refresh_token_is_not_retried() {
    let server = MockServer::start().await;
    let client = anonymous_client(&server);

    Mock::given(method("GET"))
        .and(path("/api/bets/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "auth required"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client.list_bets().await.expect_err("should surface the 401");
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_delete_accepts_204() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryTokenStore::with_tokens("acc", "ref"));
    let client = client_with_store(&server, store);

    Mock::given(method("DELETE"))
        .and(path("/api/favorites/5/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.remove_favorite(5).await.expect("204 should be a success");
}

#[tokio::test]
async fn test_search_query_is_encoded() {
    let server = MockServer::start().await;
    let client = anonymous_client(&server);

    Mock::given(method("GET"))
        .and(path("/api/lots/"))
        .and(query_param("search", "amber"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client.list_lots(Some("amber")).await.expect("search should succeed");
}

#[tokio::test]
async fn test_validation_error_carries_parsed_body() {
    let server = MockServer::start().await;
    let client = anonymous_client(&server);

    Mock::given(method("POST"))
        .and(path("/api/auth/register/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"email": ["already registered"]})),
        )
        .mount(&server)
        .await;

    let payload = auction_types::RegisterPayload::new("bob", "b@e.com", "pw");
    let err = client.register(&payload).await.expect_err("should fail");
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.message(), "email: already registered");
}

#[tokio::test]
async fn test_non_json_error_body_falls_back_to_text() {
    let server = MockServer::start().await;
    let client = anonymous_client(&server);

    Mock::given(method("GET"))
        .and(path("/api/lots/9/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = client.get_lot(9).await.expect_err("should fail");
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.message(), "<html>bad gateway</html>");
}
