//! HTTP fetcher integration tests.
//!
//! Covers the wire contract: one JSON POST per call, JSON-or-text bodies,
//! transport failures and session cookies.

use gqlpad::config::EndpointConfig;
use gqlpad::introspection;
use gqlpad::transport::{Fetcher, HttpFetcher, QueryRequest, QueryResponse};
use mockito::Matcher;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::fetcher_for;

#[tokio::test]
async fn test_posts_request_as_json_once() {
    let mut server = mockito::Server::new_async().await;
    let request = QueryRequest::new("query User($id: ID!) { user(id: $id) { name } }")
        .with_variables_json(r#"{"id": "usr_1", "nested": {"flag": true}}"#)
        .unwrap()
        .with_operation_name("User");

    let mock = server
        .mock("POST", "/query")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "query": "query User($id: ID!) { user(id: $id) { name } }",
            "variables": {"id": "usr_1", "nested": {"flag": true}},
            "operationName": "User"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":{"user":{"name":"ada"}}}"#)
        .expect(1)
        .create_async()
        .await;

    let response = fetcher_for(&server.url()).execute(&request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.data(), Some(&json!({"user": {"name": "ada"}})));
}

#[tokio::test]
async fn test_json_body_is_parsed() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/query")
        .with_status(200)
        .with_body(r#"{"data":{"x":1}}"#)
        .create_async()
        .await;

    let response = fetcher_for(&server.url())
        .execute(&QueryRequest::new("{ x }"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response, QueryResponse::Json(json!({"data": {"x": 1}})));
}

#[tokio::test]
async fn test_non_json_body_is_returned_as_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/query")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("not json")
        .create_async()
        .await;

    let response = fetcher_for(&server.url())
        .execute(&QueryRequest::new("{ x }"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response, QueryResponse::Text("not json".to_string()));
}

#[tokio::test]
async fn test_error_status_still_returns_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/query")
        .with_status(500)
        .with_body(r#"{"errors":[{"message":"email taken"}]}"#)
        .create_async()
        .await;

    let response = fetcher_for(&server.url())
        .execute(&QueryRequest::new("mutation { signup }"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.error_messages(), vec!["email taken".to_string()]);
}

#[tokio::test]
async fn test_not_found_html_is_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/query")
        .with_status(404)
        .with_body("<html>404 page not found</html>")
        .create_async()
        .await;

    let response = fetcher_for(&server.url())
        .execute(&QueryRequest::new("{ x }"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.as_text(), Some("<html>404 page not found</html>"));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Grab a free port, then close it so nothing is listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let result = fetcher_for(&format!("http://127.0.0.1:{port}"))
        .execute(&QueryRequest::new("{ x }"))
        .await;

    let err = result.unwrap_err();
    assert!(err.is_transport(), "unexpected error: {err}");
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("POST", "/query")
        .match_body(Matcher::Json(json!({"query": "{ first }"})))
        .with_body(r#"{"data":{"first":1}}"#)
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("POST", "/query")
        .match_body(Matcher::Json(json!({"query": "{ second }"})))
        .with_body(r#"{"data":{"second":2}}"#)
        .expect(1)
        .create_async()
        .await;

    let fetcher = fetcher_for(&server.url());
    let request_a = QueryRequest::new("{ first }");
    let request_b = QueryRequest::new("{ second }");
    let (a, b) = tokio::join!(fetcher.execute(&request_a), fetcher.execute(&request_b));

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(a.unwrap().data(), Some(&json!({"first": 1})));
    assert_eq!(b.unwrap().data(), Some(&json!({"second": 2})));
}

#[tokio::test]
async fn test_repeated_introspection_is_identical() {
    let mut server = mockito::Server::new_async().await;
    let body = json!({
        "data": {"__schema": {
            "queryType": {"name": "Query"},
            "mutationType": {"name": "Mutation"},
            "subscriptionType": null,
            "types": [{"kind": "OBJECT", "name": "User"}]
        }}
    })
    .to_string();
    let mock = server
        .mock("POST", "/query")
        .match_body(Matcher::PartialJson(
            json!({"operationName": "IntrospectionQuery"}),
        ))
        .with_body(body)
        .expect(2)
        .create_async()
        .await;

    let fetcher = fetcher_for(&server.url());
    let first = fetcher.execute(&introspection::request()).await.unwrap();
    let second = fetcher.execute(&introspection::request()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(first, second);
    assert_eq!(first.render(false), second.render(false));
}

#[tokio::test]
async fn test_blank_query_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/query")
        .expect(0)
        .create_async()
        .await;

    let err = fetcher_for(&server.url())
        .execute(&QueryRequest::new("  "))
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.category(), "Invalid Request");
}

#[tokio::test]
async fn test_custom_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/graphql")
        .with_body(r#"{"data":{}}"#)
        .create_async()
        .await;

    let endpoint = EndpointConfig {
        origin: server.url(),
        path: "/graphql".to_string(),
        ..Default::default()
    };
    let fetcher = HttpFetcher::new(&endpoint).unwrap();
    fetcher.execute(&QueryRequest::new("{ a }")).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_seeded_session_cookie_is_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/query")
        .match_header("cookie", "token=xyz")
        .with_body(r#"{"data":{"me":{"id":"1"}}}"#)
        .create_async()
        .await;

    let endpoint = EndpointConfig {
        origin: server.url(),
        session_cookie: Some("token=xyz".to_string()),
        ..Default::default()
    };
    let fetcher = HttpFetcher::new(&endpoint).unwrap();
    fetcher
        .execute(&QueryRequest::new("{ me { id } }"))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_session_cookie_from_response_is_reused() {
    let mut server = mockito::Server::new_async().await;
    let login = server
        .mock("POST", "/query")
        .match_body(Matcher::PartialJson(json!({"operationName": "Login"})))
        .with_header("set-cookie", "session=abc123; Path=/")
        .with_body(r#"{"data":{"login":true}}"#)
        .create_async()
        .await;
    let me = server
        .mock("POST", "/query")
        .match_body(Matcher::PartialJson(json!({"operationName": "Me"})))
        .match_header("cookie", "session=abc123")
        .with_body(r#"{"data":{"me":{"id":"1"}}}"#)
        .create_async()
        .await;

    let fetcher = fetcher_for(&server.url());
    fetcher
        .execute(&QueryRequest::new("mutation Login { login }").with_operation_name("Login"))
        .await
        .unwrap();
    let response = fetcher
        .execute(&QueryRequest::new("query Me { me { id } }").with_operation_name("Me"))
        .await
        .unwrap();

    login.assert_async().await;
    me.assert_async().await;
    assert_eq!(response.data(), Some(&json!({"me": {"id": "1"}})));
}

#[tokio::test]
async fn test_slow_backend_times_out_as_transport_error() {
    // Accepts connections but never answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let backend = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let endpoint = EndpointConfig {
        origin: format!("http://{addr}"),
        timeout_secs: Some(1),
        ..Default::default()
    };
    let started = std::time::Instant::now();
    let err = HttpFetcher::new(&endpoint)
        .unwrap()
        .execute(&QueryRequest::new("{ x }"))
        .await
        .unwrap_err();

    assert!(err.is_transport(), "unexpected error: {err}");
    assert!(err.to_string().contains("timed out"), "unexpected error: {err}");
    assert!(started.elapsed() < std::time::Duration::from_secs(10));
    backend.abort();
}

#[tokio::test]
async fn test_healthy_backend_with_timeout_succeeds() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/query")
        .with_body(r#"{"data":{"x":1}}"#)
        .create_async()
        .await;

    let endpoint = EndpointConfig {
        origin: server.url(),
        timeout_secs: Some(5),
        ..Default::default()
    };
    let response = HttpFetcher::new(&endpoint)
        .unwrap()
        .execute(&QueryRequest::new("{ x }"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.data(), Some(&json!({"x": 1})));
}
