//! Notification flow for feishu-notify.
//!
//! This module coordinates a single delivery:
//! - Loading the message text (inline or from a file)
//! - Prefixing mentions for mapped assignees
//! - Sending through the webhook service and validating the reply

pub mod dispatch;
