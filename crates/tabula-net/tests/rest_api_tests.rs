//! Tests for the REST API client.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use serde_json::json;
use tabula_net::NetworkError;
use tabula_net::http::RestApiClient;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_request_methods() {
    let client = RestApiClient::builder("http://localhost:8000")
        .build()
        .expect("Failed to build client");

    assert_eq!(client.get("/").build().unwrap().method, http::Method::GET);
    assert_eq!(client.post("/").build().unwrap().method, http::Method::POST);
    assert_eq!(client.put("/").build().unwrap().method, http::Method::PUT);
    assert_eq!(client.delete("/").build().unwrap().method, http::Method::DELETE);
    assert_eq!(
        client.request(http::Method::PATCH, "/").build().unwrap().method,
        http::Method::PATCH
    );
}

#[tokio::test]
async fn test_json_api_headers_and_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/ping"))
        .and(header("accept", "application/json"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pong": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RestApiClient::builder(mock_server.uri())
        .json_api()
        .build()
        .expect("Failed to build client");

    let body: serde_json::Value = client
        .get("api/v1/ping")
        .query("page", "3")
        .json_response()
        .await
        .expect("request failed");
    assert_eq!(body["pong"], true);
}

#[tokio::test]
async fn test_error_body_is_decoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "error": "이미 등록된 이메일입니다",
            "detail": {"field": "email"}
        })))
        .mount(&mock_server)
        .await;

    let client = RestApiClient::builder(mock_server.uri()).json_api().build().unwrap();
    let err = client
        .post("/api/v1/users")
        .json(&json!({"name": "김철수"}))
        .send_checked()
        .await
        .unwrap_err();

    match err {
        NetworkError::Api {
            status,
            ref message,
            ref detail,
        } => {
            assert_eq!(status, 400);
            assert_eq!(message.as_deref(), Some("이미 등록된 이메일입니다"));
            assert_eq!(detail.as_ref().unwrap()["field"], "email");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), "이미 등록된 이메일입니다");
}

#[tokio::test]
async fn test_non_json_error_body_uses_default_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let client = RestApiClient::builder(mock_server.uri()).build().unwrap();
    let err = client.get("/anything").send_checked().await.unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert_eq!(err.user_message(), tabula_net::DEFAULT_API_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_send_does_not_check_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = RestApiClient::builder(mock_server.uri()).build().unwrap();
    let response = client.get("/missing").send().await.unwrap();
    assert_eq!(response.status(), 404);
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_hooks_and_error_mapper() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("x-request-source", "tabula"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let seen = Arc::new(AtomicU32::new(0));
    let seen_clone = seen.clone();

    let client = RestApiClient::builder(mock_server.uri())
        .on_request(|request| {
            request
                .headers
                .insert("x-request-source", http::HeaderValue::from_static("tabula"));
        })
        .on_response(move |_| {
            seen_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .map_error(|err| match err {
            NetworkError::Api { status, .. } => {
                NetworkError::api(status, Some("서버 점검 중입니다".to_string()))
            }
            other => other,
        })
        .build()
        .unwrap();

    let err = client.get("/status").send_checked().await.unwrap_err();
    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert_eq!(err.user_message(), "서버 점검 중입니다");
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Port 9 (discard) is essentially never listening on loopback.
    let client = RestApiClient::builder("http://127.0.0.1:9").build().unwrap();
    let err = client.get("/api/v1/users").send_checked().await.unwrap_err();

    assert!(err.is_transport(), "unexpected error: {err:?}");
    assert_eq!(err.user_message(), tabula_net::NETWORK_ERROR_MESSAGE);
}
