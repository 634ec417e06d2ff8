use actix_web::{HttpResponse, web};

use crate::authentication::UserId;
use crate::delivery::send_bulk;
use crate::relay_client::RelayClient;

use super::errors::SendEmailsError;
use super::types::{BodySchema, SendEmailsResponse};

/// Fan a message out to every requested address. The batch never aborts on a
/// per-recipient failure; failures only show up in the aggregate response.
#[tracing::instrument(
    name = "Bulk email send",
    skip(body, relay_client, user_id),
    fields(recipient_count = body.emails.len(), user_id = tracing::field::Empty)
)]
pub async fn send_emails(
    body: web::Json<BodySchema>,
    relay_client: web::Data<RelayClient>,
    user_id: Option<web::ReqData<UserId>>,
) -> Result<HttpResponse, SendEmailsError> {
    if let Some(user_id) = &user_id {
        tracing::Span::current().record("user_id", tracing::field::display(&(***user_id)));
    }

    if body.emails.is_empty() {
        return Err(SendEmailsError::NoRecipients);
    }

    let report = send_bulk(&relay_client, &body.emails, &body.subject, &body.message).await;

    Ok(HttpResponse::Ok().json(SendEmailsResponse {
        success: true,
        message: format!(
            "Emails sent: {}, Failed: {}",
            report.success_count,
            report.failed_addresses.len()
        ),
        failed_emails: report.failed_addresses,
    }))
}
