use anyhow::Context;
use serde_json::Value;

use crate::{
    base::{
        mention,
        types::{SUCCESS_CODE, WebhookMessage, WebhookReply, WebhookResponse},
    },
    prelude::*,
    service::webhook::WebhookClient,
};

/// Deliver the configured notification and confirm the bot accepted it.
#[instrument(skip_all)]
pub async fn dispatch(config: &Config, webhook: &WebhookClient) -> Void {
    // Assemble the message.

    let text = load_message_text(config).await?;
    let text = prefix_mentions(config, text);
    let message = WebhookMessage::new(config.msg_type, text);

    info!("Sending {} message ...", config.msg_type);

    // Send and validate.

    let reply = webhook.send_message(&message).await?;
    let response = check_reply(&reply)?;

    debug!("Webhook accepted message: {}", response.msg);

    Ok(())
}

/// The message text, read from `message_file` when `post_message` is unset.
pub async fn load_message_text(config: &Config) -> Res<String> {
    if !config.post_message.is_empty() {
        return Ok(config.post_message.clone());
    }

    let path = &config.message_file;
    tokio::fs::read_to_string(path).await.map_err(|e| anyhow!("File '{path}' not found: {e}"))
}

/// Prepend mention tokens for mapped assignees, when mention data is configured.
pub fn prefix_mentions(config: &Config, text: String) -> String {
    if !config.has_mention_data() {
        return text;
    }

    let mentions = mention::resolve_mentions(&config.user_maps, &config.assignees);

    if mentions.is_empty() {
        debug!("No assignees matched the user map.");
        return text;
    }

    debug!("Mentioning assignees: {}", mentions.trim_end());

    mentions + &text
}

/// Parse the webhook reply; success requires HTTP 200 and a zero `code`.
pub fn check_reply(reply: &WebhookReply) -> Res<WebhookResponse> {
    let pretty = serde_json::from_str::<Value>(&reply.body)
        .ok()
        .and_then(|v| serde_json::to_string_pretty(&v).ok())
        .unwrap_or_else(|| reply.body.clone());
    debug!("Response body:\n{}", pretty);

    let response: WebhookResponse = serde_json::from_str(&reply.body).context("Failed to parse response")?;

    if reply.status != 200 || response.code != SUCCESS_CODE {
        return Err(anyhow!("Request failed with code {}: {}", response.code, response.msg));
    }

    Ok(response)
}

// Tests.
