//! Runtime services for a single feishu-notify invocation.

use crate::{
    interaction::dispatch,
    prelude::*,
    service::webhook::WebhookClient,
};

/// Runtime service context for one notification run.
///
/// This struct holds the configuration and the webhook client. It is
/// trivially cloneable, allowing it to be passed around without the need
/// for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The webhook client instance.
    pub webhook: WebhookClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        // Initialize the webhook client.
        let webhook = WebhookClient::feishu(&config)?;

        Ok(Self { config, webhook })
    }

    /// Send the configured notification.
    pub async fn start(&self) -> Void {
        dispatch::dispatch(&self.config, &self.webhook).await
    }
}
