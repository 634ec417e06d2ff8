use wiremock::{
    Mock, ResponseTemplate,
    matchers::{any, body_string_contains, method, path},
};

use super::helpers::{spawn_app, spawn_app_without_send_auth};

#[tokio::test]
async fn an_empty_recipient_list_is_rejected_before_any_dispatch() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.mail_server)
        .await;

    let body = serde_json::json!({
        "emails": [],
        "subject": "Hello",
        "message": "World",
    });
    let token = app.issue_test_token();
    let response = app.post_send_emails(&body, Some(&token)).await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn a_missing_recipient_list_is_rejected() {
    let app = spawn_app().await;

    let body = serde_json::json!({
        "subject": "Hello",
        "message": "World",
    });
    let token = app.issue_test_token();
    let response = app.post_send_emails(&body, Some(&token)).await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn every_recipient_gets_one_submission() {
    let app = spawn_app().await;

    Mock::given(path("/v1/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&app.mail_server)
        .await;

    let body = serde_json::json!({
        "emails": ["a@test.com", "b@test.com", "c@test.com"],
        "subject": "Hello",
        "message": "World",
    });
    let token = app.issue_test_token();
    let response = app.post_send_emails(&body, Some(&token)).await;

    assert_eq!(response.status().as_u16(), 200);
    let report: serde_json::Value = response.json().await.unwrap();
    assert_eq!(report["success"], true);
    assert_eq!(report["message"], "Emails sent: 3, Failed: 0");
    assert_eq!(report["failedEmails"], serde_json::json!([]));
}

#[tokio::test]
async fn a_failed_recipient_is_reported_by_its_own_address() {
    let app = spawn_app().await;

    Mock::given(body_string_contains("b@fail.test"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.mail_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.mail_server)
        .await;

    let body = serde_json::json!({
        "emails": ["a@ok.test", "b@fail.test", "c@ok.test"],
        "subject": "Hello",
        "message": "World",
    });
    let token = app.issue_test_token();
    let response = app.post_send_emails(&body, Some(&token)).await;

    assert_eq!(response.status().as_u16(), 200);
    let report: serde_json::Value = response.json().await.unwrap();
    assert_eq!(report["message"], "Emails sent: 2, Failed: 1");
    assert_eq!(report["failedEmails"], serde_json::json!(["b@fail.test"]));
}

#[tokio::test]
async fn requests_without_a_token_are_rejected() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.mail_server)
        .await;

    let body = serde_json::json!({
        "emails": ["a@test.com"],
        "subject": "Hello",
        "message": "World",
    });
    let response = app.post_send_emails(&body, None).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn requests_with_a_garbage_token_are_rejected() {
    let app = spawn_app().await;

    let body = serde_json::json!({
        "emails": ["a@test.com"],
        "subject": "Hello",
        "message": "World",
    });
    let response = app.post_send_emails(&body, Some("not-a-real-token")).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn the_opt_out_configuration_accepts_tokenless_sends() {
    let app = spawn_app_without_send_auth().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.mail_server)
        .await;

    let body = serde_json::json!({
        "emails": ["a@test.com"],
        "subject": "Hello",
        "message": "World",
    });
    let response = app.post_send_emails(&body, None).await;

    assert_eq!(response.status().as_u16(), 200);
}
