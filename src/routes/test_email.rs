use actix_web::{HttpResponse, web};

use crate::delivery::{SendOutcome, dispatch};
use crate::relay_client::RelayClient;
use crate::startup::TestRecipient;

#[derive(serde::Serialize)]
struct TestEmailResponse {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[tracing::instrument(name = "Sending a test email", skip(relay_client, test_recipient))]
pub async fn test_email(
    relay_client: web::Data<RelayClient>,
    test_recipient: web::Data<TestRecipient>,
) -> HttpResponse {
    let outcome = dispatch(
        &relay_client,
        &test_recipient.0,
        "Test Email",
        "This is a test email!",
    )
    .await;

    match outcome {
        SendOutcome::Delivered => HttpResponse::Ok().json(TestEmailResponse {
            success: true,
            message: format!("Email sent to {}", test_recipient.0),
            error: None,
        }),
        SendOutcome::Failed(reason) => HttpResponse::Ok().json(TestEmailResponse {
            success: false,
            message: "Test email failed".into(),
            error: Some(reason),
        }),
    }
}
