//! Staff notification channel (Telegram bot)
//!
//! Fire-and-forget by contract: callers spawn these and a delivery
//! failure is logged, never surfaced to the user. Exactly-once delivery
//! is explicitly not guaranteed.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use chatai_config::TelegramSettings;
use chatai_core::{Notifier, Result};

use crate::IntegrationError;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Telegram bot notifier
pub struct TelegramNotifier {
    client: Client,
    bot_token: String,
    chat_id: String,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SendPhoto<'a> {
    chat_id: &'a str,
    photo: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    caption: Option<&'a str>,
}

impl TelegramNotifier {
    pub fn new(settings: &TelegramSettings) -> std::result::Result<Self, IntegrationError> {
        if settings.bot_token.is_empty() || settings.chat_id.is_empty() {
            return Err(IntegrationError::Configuration(
                "telegram notifier needs bot_token and chat_id".to_string(),
            ));
        }
        let client = Client::builder().timeout(SEND_TIMEOUT).build().map_err(|e| {
            IntegrationError::Configuration(format!("failed to create HTTP client: {e}"))
        })?;
        Ok(Self {
            client,
            bot_token: settings.bot_token.clone(),
            chat_id: settings.chat_id.clone(),
        })
    }

    fn api_url(&self, method: &str) -> String {
        format!("https://api.telegram.org/bot{}/{}", self.bot_token, method)
    }

    async fn post<T: Serialize>(
        &self,
        method: &str,
        payload: &T,
    ) -> std::result::Result<(), IntegrationError> {
        let response = self
            .client
            .post(self.api_url(method))
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(IntegrationError::ConnectionFailed(format!(
                "telegram {method} returned HTTP {status}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify_text(&self, message: &str) -> Result<()> {
        self.post(
            "sendMessage",
            &SendMessage {
                chat_id: &self.chat_id,
                text: message,
            },
        )
        .await
        .map_err(|e| chatai_core::Error::Notify(e.to_string()))
    }

    async fn notify_images(&self, caption: &str, images: &[String]) -> Result<()> {
        for (index, image) in images.iter().enumerate() {
            self.post(
                "sendPhoto",
                &SendPhoto {
                    chat_id: &self.chat_id,
                    photo: image,
                    // Caption only on the first photo of a batch.
                    caption: (index == 0).then_some(caption),
                },
            )
            .await
            .map_err(|e| chatai_core::Error::Notify(e.to_string()))?;
        }
        Ok(())
    }
}

/// No-op notifier for deployments without a staff channel.
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn notify_text(&self, message: &str) -> Result<()> {
        tracing::info!(message, "staff notification suppressed (no channel configured)");
        Ok(())
    }

    async fn notify_images(&self, caption: &str, images: &[String]) -> Result<()> {
        tracing::info!(
            caption,
            count = images.len(),
            "staff image notification suppressed (no channel configured)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_credentials() {
        let settings = TelegramSettings {
            enabled: true,
            bot_token: String::new(),
            chat_id: "123".to_string(),
        };
        assert!(TelegramNotifier::new(&settings).is_err());
    }

    #[test]
    fn api_url_embeds_token_and_method() {
        let settings = TelegramSettings {
            enabled: true,
            bot_token: "bot-token".to_string(),
            chat_id: "123".to_string(),
        };
        let notifier = TelegramNotifier::new(&settings).unwrap();
        assert_eq!(
            notifier.api_url("sendPhoto"),
            "https://api.telegram.org/botbot-token/sendPhoto"
        );
    }
}
