//! Feishu custom-bot webhook integration.
//!
//! Posts JSON payloads to `<base>/<bot_token>` over reqwest with a bounded
//! request timeout.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, instrument};

use crate::base::{
    config::Config,
    types::{Res, WebhookMessage, WebhookReply},
};

use super::{GenericWebhookClient, WebhookClient};

// Extra methods on `WebhookClient` applied by the feishu implementation.

impl WebhookClient {
    /// Creates a new Feishu webhook client.
    pub fn feishu(config: &Config) -> Res<Self> {
        let client = FeishuWebhookClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Specific implementations.

/// Feishu webhook client implementation.
#[derive(Clone)]
pub struct FeishuWebhookClient {
    client: reqwest::Client,
    /// Full webhook URL, including the bot token.
    url: String,
    /// Base endpoint without the token, safe to log.
    endpoint: String,
}

impl FeishuWebhookClient {
    /// Create a new Feishu webhook client.
    #[instrument(name = "FeishuWebhookClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create request")?;

        Ok(Self {
            client,
            url: config.webhook_url(),
            endpoint: config.webhook_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl GenericWebhookClient for FeishuWebhookClient {
    #[instrument(name = "FeishuWebhookClient::send_message", skip_all)]
    async fn send_message(&self, message: &WebhookMessage) -> Res<WebhookReply> {
        let body = serde_json::to_vec(message).context("Failed to marshal request body")?;

        info!(endpoint = %self.endpoint, "POST webhook message ...");
        debug!("Request body:\n{}", serde_json::to_string_pretty(message).unwrap_or_default());

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status().as_u16();
        let body = response.text().await.context("Failed to read response")?;

        info!(status, "Received webhook response.");

        Ok(WebhookReply { status, body })
    }
}

// Tests.
