//! Notification Port - Abstraction for pushing alerts to a messaging endpoint

use async_trait::async_trait;
use std::fmt;

use crate::error::DeliveryError;

/// Opaque endpoint reference (e.g. a webhook URL)
///
/// Webhook URLs embed their credentials, so `Debug` and `Display` never print
/// the full value.
#[derive(Clone, PartialEq, Eq)]
pub struct NotificationTarget(String);

impl NotificationTarget {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self(endpoint.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn redacted(&self) -> String {
        // Keep scheme and host only
        match self.0.split_once("://") {
            Some((scheme, rest)) => {
                let host = rest.split('/').next().unwrap_or_default();
                format!("{}://{}/…", scheme, host)
            }
            None => "…".to_string(),
        }
    }
}

impl fmt::Debug for NotificationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NotificationTarget({})", self.redacted())
    }
}

impl fmt::Display for NotificationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

/// Rich embed block shown under the message text
#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    /// 24-bit RGB
    pub color: u32,
    /// File name of an attachment to show inside the embed
    pub image_attachment: Option<String>,
}

/// Binary file sent with the message
#[derive(Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Everything needed for one delivery
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub target: NotificationTarget,
    pub content: String,
    pub embed: Option<Embed>,
    pub attachment: Option<Attachment>,
}

impl Notification {
    pub fn new(target: NotificationTarget, content: impl Into<String>) -> Self {
        Self {
            target,
            content: content.into(),
            embed: None,
            attachment: None,
        }
    }

    pub fn with_embed(mut self, embed: Embed) -> Self {
        self.embed = Some(embed);
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Copy without the attachment or any embed reference to it
    pub fn text_only(&self) -> Self {
        Self {
            target: self.target.clone(),
            content: self.content.clone(),
            embed: self.embed.clone().map(|e| Embed {
                image_attachment: None,
                ..e
            }),
            attachment: None,
        }
    }
}

/// Status returned by the endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryStatus {
    pub code: u16,
    pub body: String,
}

impl DeliveryStatus {
    /// 200 and 204 are the only accepted codes
    pub fn is_success(&self) -> bool {
        matches!(self.code, 200 | 204)
    }

    /// Turn a non-success status into a [`DeliveryError`]
    pub fn into_result(self) -> Result<Self, DeliveryError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(DeliveryError::Rejected {
                status: self.code,
                body: self.body,
            })
        }
    }
}

/// Port for delivering notifications
///
/// Implementations report whatever status the endpoint answered with;
/// `Err` is reserved for transport failures where no status exists.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, notification: &Notification) -> Result<DeliveryStatus, DeliveryError>;

    /// Get the notifier's name/identifier for debugging
    fn name(&self) -> &str {
        "Notifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_redacted() {
        let target = NotificationTarget::new("https://discord.com/api/webhooks/123/secret-token");
        assert_eq!(target.to_string(), "https://discord.com/…");
        assert!(!format!("{:?}", target).contains("secret-token"));
        assert!(target.as_str().ends_with("secret-token"));
    }

    #[test]
    fn test_delivery_status() {
        for code in [200, 204] {
            let status = DeliveryStatus {
                code,
                body: String::new(),
            };
            assert!(status.clone().into_result().is_ok());
        }

        let err = DeliveryStatus {
            code: 429,
            body: "rate limited".to_string(),
        }
        .into_result()
        .unwrap_err();
        assert_eq!(
            err,
            DeliveryError::Rejected {
                status: 429,
                body: "rate limited".to_string()
            }
        );
    }

    #[test]
    fn test_text_only_drops_image() {
        let notification = Notification::new(NotificationTarget::new("https://x/y"), "hi")
            .with_embed(Embed {
                title: "AAPL".to_string(),
                description: "desc".to_string(),
                color: 0x03b2f8,
                image_attachment: Some("chart.png".to_string()),
            })
            .with_attachment(Attachment {
                file_name: "chart.png".to_string(),
                bytes: vec![1, 2, 3],
            });

        let degraded = notification.text_only();
        assert!(degraded.attachment.is_none());
        assert_eq!(degraded.embed.as_ref().unwrap().image_attachment, None);
        assert_eq!(degraded.embed.unwrap().title, "AAPL");
    }
}
