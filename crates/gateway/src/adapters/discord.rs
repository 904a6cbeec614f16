//! Discord webhook adapter (Gateway Out)
//!
//! Messages without a file are posted as JSON. Messages with a file are
//! posted as `multipart/form-data` with the JSON under `payload_json` and the
//! file under `files[0]`; the embed references it as `attachment://<name>`.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use tracing::debug;
use trendalert_ports::{DeliveryError, DeliveryStatus, Notification, Notifier};

use crate::error::describe;

/// Webhook notifier speaking the Discord execute-webhook format
#[derive(Clone)]
pub struct DiscordNotifier {
    client: Client,
}

impl DiscordNotifier {
    pub fn new(client: Client) -> Self {
        DiscordNotifier { client }
    }

    fn request(&self, notification: &Notification) -> Result<reqwest::RequestBuilder, DeliveryError> {
        let url = notification.target.as_str();
        let payload = payload_json(notification);

        let builder = match &notification.attachment {
            Some(attachment) => {
                let file = Part::bytes(attachment.bytes.clone())
                    .file_name(attachment.file_name.clone())
                    .mime_str("image/png")
                    .map_err(|e| DeliveryError::Transport(describe(&e)))?;
                let form = Form::new()
                    .text("payload_json", payload.to_string())
                    .part("files[0]", file);
                self.client.post(url).multipart(form)
            }
            None => self.client.post(url).json(&payload),
        };

        Ok(builder)
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn deliver(&self, notification: &Notification) -> Result<DeliveryStatus, DeliveryError> {
        debug!(
            "Posting notification to {} (attachment: {})",
            notification.target,
            notification.attachment.is_some()
        );

        let resp = self
            .request(notification)?
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(describe(&e)))?;

        let code = resp.status().as_u16();
        // The body only matters for diagnostics; a failed read is not fatal
        let body = resp.text().await.unwrap_or_default();

        Ok(DeliveryStatus { code, body })
    }

    fn name(&self) -> &str {
        "discord"
    }
}

/// JSON body of an execute-webhook call
pub fn payload_json(notification: &Notification) -> Value {
    let mut payload = json!({ "content": notification.content });

    if let Some(embed) = &notification.embed {
        let mut embed_json = json!({
            "title": embed.title,
            "description": embed.description,
            "color": embed.color,
        });
        if let Some(file_name) = &embed.image_attachment {
            embed_json["image"] = json!({ "url": format!("attachment://{}", file_name) });
        }
        payload["embeds"] = json!([embed_json]);
    }

    if let Some(attachment) = &notification.attachment {
        payload["attachments"] = json!([{ "id": 0, "filename": attachment.file_name }]);
    }

    payload
}
