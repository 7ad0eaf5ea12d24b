//! Library root for `feishu-notify`.
//!
//! Feishu-notify posts a text message to a Feishu (Lark) custom-bot webhook
//! from a CI pipeline:
//! - Reads its inputs from `INPUT_*` or plain environment variables
//! - Loads the message inline or from a file
//! - Mentions assignees that appear in a `username:open_id` user map
//! - Fails the step unless the bot confirms delivery
//!
//! The webhook transport sits behind a trait so the delivery flow can be
//! exercised without a network.

#[deny(missing_docs)]
pub mod base;
pub mod interaction;
pub mod prelude;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Builds the runtime context with the webhook client and sends one
/// notification.
pub async fn start(config: Config) -> Void {
    info!("Starting feishu-notify ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Send the notification.
    runtime.start().await?;

    Ok(())
}
