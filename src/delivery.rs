use futures::future::join_all;

use crate::{domain::Recipient, relay_client::RelayClient};

/// Outcome of a single delivery attempt. Failures carry the transport detail
/// for logging; the aggregate report only keeps the address.
#[derive(Debug)]
pub enum SendOutcome {
    Delivered,
    Failed(String),
}

#[derive(Debug)]
pub struct DeliveryReport {
    pub success_count: usize,
    pub failed_addresses: Vec<String>,
}

/// Submit one message, converting every failure mode into a `SendOutcome`.
/// Nothing propagates to the caller.
#[tracing::instrument(name = "Dispatching single email", skip(relay_client, body))]
pub async fn dispatch(
    relay_client: &RelayClient,
    address: &str,
    subject: &str,
    body: &str,
) -> SendOutcome {
    let recipient = match Recipient::parse(address.to_string()) {
        Ok(recipient) => recipient,
        Err(reason) => {
            tracing::warn!("Refusing to dispatch to {address}: {reason}");
            return SendOutcome::Failed(reason);
        }
    };

    match relay_client.send(&recipient, subject, body).await {
        Ok(()) => {
            tracing::info!("Email sent to {address}");
            SendOutcome::Delivered
        }
        Err(err) => {
            tracing::warn!(
                error.cause_chain = ?err,
                "Failed to send email to {address}"
            );
            SendOutcome::Failed(err.to_string())
        }
    }
}

/// Fan the dispatcher out over every recipient concurrently and wait for all
/// attempts to settle. Outcomes are paired with their originating address by
/// position in the request list, so attribution survives any completion order.
#[tracing::instrument(
    name = "Dispatching bulk emails",
    skip(relay_client, recipients, body),
    fields(recipient_count = recipients.len())
)]
pub async fn send_bulk(
    relay_client: &RelayClient,
    recipients: &[String],
    subject: &str,
    body: &str,
) -> DeliveryReport {
    let outcomes = join_all(
        recipients
            .iter()
            .map(|address| dispatch(relay_client, address, subject, body)),
    )
    .await;

    let mut success_count = 0;
    let mut failed_addresses = Vec::new();
    for (address, outcome) in recipients.iter().zip(outcomes) {
        match outcome {
            SendOutcome::Delivered => success_count += 1,
            SendOutcome::Failed(_) => failed_addresses.push(address.clone()),
        }
    }

    tracing::info!(
        success_count,
        failed_count = failed_addresses.len(),
        "Bulk dispatch settled"
    );

    DeliveryReport {
        success_count,
        failed_addresses,
    }
}
