use super::helpers::spawn_app_with_database;

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn login_with_valid_credentials_returns_an_accepted_token() {
    let app = spawn_app_with_database().await;

    let credentials = serde_json::json!({
        "email": "operator@test.com",
        "password": "correct horse battery staple",
    });
    assert_eq!(app.post_signup(&credentials).await.status().as_u16(), 200);

    let response = app.post_login(&credentials).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    let token = body["token"].as_str().expect("No token in login response.");

    // The guarded route accepts what /login issued.
    let send_body = serde_json::json!({
        "emails": [],
        "subject": "s",
        "message": "m",
    });
    let guarded = app.post_send_emails(&send_body, Some(token)).await;
    assert_ne!(guarded.status().as_u16(), 401);
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn login_with_a_wrong_password_is_rejected() {
    let app = spawn_app_with_database().await;

    let credentials = serde_json::json!({
        "email": "operator@test.com",
        "password": "correct horse battery staple",
    });
    assert_eq!(app.post_signup(&credentials).await.status().as_u16(), 200);

    let response = app
        .post_login(&serde_json::json!({
            "email": "operator@test.com",
            "password": "wrong password",
        }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
#[ignore = "requires a running Postgres"]
async fn login_with_an_unknown_email_is_rejected() {
    let app = spawn_app_with_database().await;

    let response = app
        .post_login(&serde_json::json!({
            "email": "nobody@test.com",
            "password": "whatever",
        }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
}
