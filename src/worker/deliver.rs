use tracing::{info, warn};

use super::Clients;
use super::compose::make_message;
use crate::clients::webhook_client::build_webhook_payload;
use crate::core::config::AppConfig;
use crate::core::models::{DailyDigest, RunReport};

/// Sends the digest to Telegram, then to the webhook when one is configured.
///
/// Failures are logged by the clients and show up as `None` in the report.
pub async fn deliver_digest(config: &AppConfig, clients: &Clients, digest: &DailyDigest) -> RunReport {
    let full_message = make_message(&digest.fragments);

    info!("Sending to Telegram...");
    let telegram = clients
        .telegram
        .send_message(&config.tg_chat_id, &full_message, digest.image_url())
        .await;
    match &telegram {
        Some(reply) => info!("Telegram replied: {}", reply),
        None => warn!("Telegram delivery failed"),
    }

    let webhook = match &clients.webhook {
        Some(webhook) => {
            info!("Sending to webhook...");
            let payload = build_webhook_payload(&full_message, &digest.poem_message, digest.image_url());
            webhook.send(&payload).await
        }
        None => {
            info!("WEBHOOK_URL is not set, skipping webhook delivery");
            None
        }
    };

    RunReport { telegram, webhook }
}
