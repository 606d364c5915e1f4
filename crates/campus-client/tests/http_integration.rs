//! Integration tests for the API client
//!
//! These tests use wiremock to stand in for the SmartCampus backend and
//! exercise the full request/response cycle, auth header handling, and
//! error normalization.

use campus_client::api::CampusApi;
use campus_client::http::{ApiClient, ApiClientConfig, ApiError, ApiRequest};
use campus_client::types::{LoginRequest, RegisterRequest, ResourceId, School};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiClientConfig::new(server.uri())).unwrap()
}

// =============================================================================
// Successful Request Tests
// =============================================================================

#[tokio::test]
async fn test_get_under_base_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/schools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 1, "name": "Lincoln High", "code": "LHS"}
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let schools: Vec<School> = client.get("/schools").await.unwrap();

    assert_eq!(schools.len(), 1);
    assert_eq!(schools[0].id, ResourceId::Number(1));
    assert_eq!(schools[0].name, "Lincoln High");
}

#[tokio::test]
async fn test_type_erased_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/assignments"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": "a", "extra": true}])),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let value: serde_json::Value = client.get("/assignments").await.unwrap();

    assert_eq!(value, serde_json::json!([{"id": "a", "extra": true}]));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"username": "admin", "password": "password"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "jwt-1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = CampusApi::new(client_for(&mock_server));
    let token = api.login(&LoginRequest::new("admin", "password")).await.unwrap();

    assert_eq!(token, "jwt-1");
}

#[tokio::test]
async fn test_register_accepts_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let api = CampusApi::new(client_for(&mock_server));
    let details = RegisterRequest {
        username: "ada".to_string(),
        email: "ada@example.com".to_string(),
        password: "secret".to_string(),
    };

    api.register(&details).await.unwrap();
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/schools"))
        .and(header("x-tenant", "north"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ApiClientConfig::new(mock_server.uri()).with_header("X-Tenant", "north");
    let client = ApiClient::new(config).unwrap();
    let schools: Vec<School> = client.get("/schools").await.unwrap();

    assert!(schools.is_empty());
}

// =============================================================================
// Authorization Header Tests
// =============================================================================

#[tokio::test]
async fn test_bearer_header_follows_configure_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/schools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    client.configure_auth("abc123");
    let _: serde_json::Value = client.get("/schools").await.unwrap();

    client.configure_auth("");
    let _: serde_json::Value = client.get("/schools").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].headers.get("authorization").unwrap().to_str().unwrap(),
        "Bearer abc123"
    );
    assert!(requests[1].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_request_cannot_override_session_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/schools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let forged = || ApiRequest::get("/schools").header("Authorization", "Bearer forged");

    client.configure_auth("session");
    let _: serde_json::Value = client.execute(forged()).await.unwrap();

    client.configure_auth("");
    let _: serde_json::Value = client.execute(forged()).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let sent: Vec<_> = requests[0].headers.get_all("authorization").iter().collect();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to_str().unwrap(), "Bearer session");
    assert!(requests[1].headers.get("authorization").is_none());
}

// =============================================================================
// Error Normalization Tests
// =============================================================================

#[tokio::test]
async fn test_backend_rejection_keeps_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"error": "invalid_credentials"})),
        )
        .mount(&mock_server)
        .await;

    let api = CampusApi::new(client_for(&mock_server));
    let error = api.login(&LoginRequest::new("admin", "wrong")).await.unwrap_err();

    assert_eq!(error.status(), Some(401));
    assert_eq!(error.error(), "invalid_credentials");
    assert_eq!(error.to_json(), serde_json::json!({"error": "invalid_credentials"}));
}

#[tokio::test]
async fn test_server_error_without_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/assignments"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let api = CampusApi::new(client_for(&mock_server));
    let error = api.list_assignments().await.unwrap_err();

    assert_eq!(error.status(), Some(500));
    assert_eq!(error.error(), "Request failed with status code 500");
    assert_eq!(error.body(), None);
}

#[tokio::test]
async fn test_timeout_is_normalized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"token": "late"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let config =
        ApiClientConfig::new(mock_server.uri()).with_timeout(Duration::from_millis(100));
    let api = CampusApi::new(ApiClient::new(config).unwrap());
    let error = api.login(&LoginRequest::new("admin", "password")).await.unwrap_err();

    assert!(error.is_transport_failure());
    assert_eq!(error.error(), "timeout of 100ms exceeded");
}

#[tokio::test]
async fn test_connection_refused_is_normalized() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(ApiClientConfig::new(format!("http://{}", addr))).unwrap();
    let result: Result<serde_json::Value, ApiError> = client.get("/schools").await;
    let error = result.unwrap_err();

    assert!(error.is_transport_failure());
    assert!(!error.error().is_empty());
    assert_eq!(error.to_json()["error"], serde_json::json!(error.error()));
}

#[tokio::test]
async fn test_contract_drift_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/schools"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"schools": []})),
        )
        .mount(&mock_server)
        .await;

    let api = CampusApi::new(client_for(&mock_server));
    let error = api.list_schools().await.unwrap_err();

    assert_eq!(error.status(), None);
    assert!(error.error().starts_with("invalid_response"));
}

#[tokio::test]
async fn test_login_with_empty_token_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": ""})))
        .mount(&mock_server)
        .await;

    let api = CampusApi::new(client_for(&mock_server));
    let error = api.login(&LoginRequest::new("admin", "password")).await.unwrap_err();

    assert_eq!(error.error(), "invalid_response: empty token");
}
