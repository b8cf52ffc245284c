//! `HttpAutomationClient` against a local mock endpoint.

use mockito::Matcher;
use partbot_models::{InventoryArgs, OutboundRequest};
use partbot_relay::{AutomationClient, HttpAutomationClient, RelayError};
use serde_json::json;

#[tokio::test]
async fn posts_json_with_action_and_decodes_object() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/exec")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "action": "inventory",
            "sku": "",
            "search": "bearing",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"ok","matches":[]}"#)
        .create_async()
        .await;

    let client = HttpAutomationClient::new(format!("{}/exec", server.url()));
    let request = OutboundRequest::from(&InventoryArgs::new("", "bearing"));
    let response = client.call(&request).await.unwrap();

    assert!(response.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn application_errors_are_returned_as_responses() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/exec")
        .with_status(200)
        .with_body(r#"{"status":"error","message":"Sheet locked"}"#)
        .create_async()
        .await;

    let client = HttpAutomationClient::new(format!("{}/exec", server.url()));
    let response = client.call(&OutboundRequest::OpenOrders).await.unwrap();

    assert!(!response.is_ok());
    assert_eq!(response.message().as_deref(), Some("Sheet locked"));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/exec")
        .with_status(500)
        .with_body("Internal error")
        .create_async()
        .await;

    let client = HttpAutomationClient::new(format!("{}/exec", server.url()));
    let err = client.call(&OutboundRequest::OpenOrders).await.unwrap_err();

    match err {
        RelayError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal error");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn html_body_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/exec")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<!DOCTYPE html><title>Sign in</title>")
        .create_async()
        .await;

    let client = HttpAutomationClient::new(format!("{}/exec", server.url()));
    let err = client.call(&OutboundRequest::OpenOrders).await.unwrap_err();
    assert!(matches!(err, RelayError::Decode(_)), "got {err}");
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = HttpAutomationClient::new(format!("http://127.0.0.1:{port}/exec"));
    let err = client.call(&OutboundRequest::OpenOrders).await.unwrap_err();
    assert!(matches!(err, RelayError::Transport(_)), "got {err}");
}

#[tokio::test]
async fn refused_connection_reaches_requester_as_generic_failure() {
    use partbot_models::command::OPEN_ORDERS;
    use partbot_models::CommandInvocation;
    use partbot_relay::handlers::CONTACT_FAILURE;
    use partbot_relay::test_support::RecordingResponder;
    use partbot_relay::Dispatcher;
    use std::sync::Arc;

    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = Arc::new(HttpAutomationClient::new(format!(
        "http://127.0.0.1:{port}/exec"
    )));

    let responder = RecordingResponder::new();
    Dispatcher::new(client)
        .dispatch(&CommandInvocation::new(OPEN_ORDERS, "alex"), &responder)
        .await;

    assert_eq!(responder.last_content().as_deref(), Some(CONTACT_FAILURE));
}
