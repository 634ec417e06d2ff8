use std::time::Duration;

use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::Recipient;

const FALLBACK_BODY: &str = "This is a test email.";

#[derive(Clone)]
pub struct RelayClient {
    http_client: Client,
    base_url: Url,
    sender: Recipient,
    auth_token: SecretString,
}

#[derive(Serialize)]
struct EmailUnit<'a> {
    email: &'a str,
}

impl<'a> EmailUnit<'a> {
    fn new(email: &'a str) -> Self {
        Self { email }
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: EmailUnit<'a>,
    to: Vec<EmailUnit<'a>>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

impl RelayClient {
    pub fn new(
        base_url: String,
        sender: Recipient,
        auth_token: SecretString,
        timeout: Duration,
    ) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build the relay http client."),
            base_url: Url::parse(&base_url).expect("Failed parsing base relay api url."),
            sender,
            auth_token,
        }
    }

    /// Submit a single message for delivery. A non-2xx acceptance from the
    /// relay is an error, same as any transport failure.
    pub async fn send(
        &self,
        recipient: &Recipient,
        subject: &str,
        text: &str,
    ) -> Result<(), reqwest::Error> {
        let url = self
            .base_url
            .join("v1/email")
            .expect("Failed joining route to relay api url.");

        let text = if text.is_empty() { FALLBACK_BODY } else { text };
        let html = format!("<p>{text}</p>");
        let body = SendEmailRequest {
            from: EmailUnit::new(self.sender.as_ref()),
            to: vec![EmailUnit::new(recipient.as_ref())],
            subject,
            html: &html,
            text,
        };

        self.http_client
            .post(url)
            .header(
                "Authorization",
                "Bearer ".to_owned() + self.auth_token.expose_secret(),
            )
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
