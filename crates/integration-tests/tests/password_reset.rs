//! Password-reset collaborator client.

#![allow(clippy::unwrap_used)]

use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::json;
use url::Url;

use mathmarket_core::Email;
use mathmarket_storefront::api::PasswordResetClient;

const RESET_PATH: &str = "/password-reset";

fn client(server: &MockServer) -> PasswordResetClient {
    PasswordResetClient::new(Url::parse(&server.url(RESET_PATH)).unwrap())
}

#[tokio::test]
async fn test_request_reset_sends_email_action() {
    let server = MockServer::start_async().await;
    let reset = server
        .mock_async(|when, then| {
            when.method(POST).path(RESET_PATH).json_body_partial(
                r#"{"action": "request_reset", "email": "student@example.com"}"#,
            );
            then.status(200).json_body(json!({"ok": true}));
        })
        .await;

    let email = Email::parse("student@example.com").unwrap();
    client(&server).request_reset(&email).await.unwrap();
    reset.assert_async().await;
}

#[tokio::test]
async fn test_reset_password_sends_token_and_new_password() {
    let server = MockServer::start_async().await;
    let reset = server
        .mock_async(|when, then| {
            when.method(POST).path(RESET_PATH).json_body_partial(
                r#"{"action": "reset_password", "token": "t-1", "new_password": "fresh"}"#,
            );
            then.status(200).json_body(json!({"ok": true}));
        })
        .await;

    client(&server).reset_password("t-1", "fresh").await.unwrap();
    reset.assert_async().await;
}

#[tokio::test]
async fn test_expired_token_is_surfaced() {
    let server = MockServer::start_async().await;
    let _reset = server
        .mock_async(|when, then| {
            when.method(POST).path(RESET_PATH);
            then.status(400).json_body(json!({"error": "Token expired"}));
        })
        .await;

    let err = client(&server)
        .reset_password("t-old", "fresh")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Token expired"));
}
