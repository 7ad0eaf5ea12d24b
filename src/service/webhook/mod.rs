pub mod feishu;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{Res, WebhookMessage, WebhookReply};

// Traits.

/// Generic "webhook" trait that transports must implement.
///
/// Implementations only deliver the payload and hand back the raw HTTP
/// reply; deciding whether the bot accepted the message is left to the caller.
#[async_trait]
pub trait GenericWebhookClient: Send + Sync + 'static {
    /// Post a message to the bot webhook.
    ///
    /// Errors cover serialization, transport failures, timeouts and an
    /// unreadable response body. Non-2xx replies are returned, not raised.
    async fn send_message(&self, message: &WebhookMessage) -> Res<WebhookReply>;
}

// Structs.

/// Webhook client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct WebhookClient {
    inner: Arc<dyn GenericWebhookClient>,
}

impl Deref for WebhookClient {
    type Target = dyn GenericWebhookClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl WebhookClient {
    pub fn new(inner: Arc<dyn GenericWebhookClient>) -> Self {
        Self { inner }
    }
}
