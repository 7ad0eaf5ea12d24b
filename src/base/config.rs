//! Load configuration via `config` crate with env-override support.
//!
//! Values are resolved from (lowest to highest precedence) an optional TOML
//! file, bare environment variables (`BOT_TOKEN`), and CI-wrapped inputs
//! (`INPUT_BOT_TOKEN`). Empty values never shadow a lower layer.

use std::{ops::Deref, path::Path, sync::Arc};

use serde::Deserialize;

use super::types::{MsgType, Res};

/// Prefix CI runners put in front of action inputs.
pub const INPUT_PREFIX: &str = "INPUT";

/// Default Feishu custom-bot webhook endpoint.
fn default_webhook_base_url() -> String {
    "https://open.feishu.cn/open-apis/bot/v2/hook".to_string()
}

/// Default request timeout in seconds.
fn default_request_timeout_secs() -> u64 {
    30
}

/// Configuration for a single notification run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared configuration values.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Configuration values, deserialized from all layers.
#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// Bot token appended to the webhook URL (`BOT_TOKEN`).
    #[serde(default)]
    pub bot_token: String,
    /// Literal message text (`POST_MESSAGE`).
    #[serde(default)]
    pub post_message: String,
    /// Path to a file holding the message, used when `POST_MESSAGE` is unset (`MESSAGE_FILE`).
    #[serde(default)]
    pub message_file: String,
    /// Message flavor, `text` or `markdown` (`MSG_TYPE`).
    #[serde(default)]
    pub msg_type: MsgType,
    /// Comma-separated `username:open_id` pairs (`USER_MAPS`).
    #[serde(default)]
    pub user_maps: String,
    /// JSON list (or single object) of assignees with a `login` field (`ASSIGNEES`).
    #[serde(default)]
    pub assignees: String,
    /// Base webhook endpoint; the bot token is appended as the last path segment (`WEBHOOK_BASE_URL`).
    #[serde(default = "default_webhook_base_url")]
    pub webhook_base_url: String,
    /// Request timeout in seconds (`REQUEST_TIMEOUT_SECS`).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            post_message: String::new(),
            message_file: String::new(),
            msg_type: MsgType::default(),
            user_maps: String::new(),
            assignees: String::new(),
            webhook_base_url: default_webhook_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load from the process environment and an optional config file.
    pub fn load(explicit_path: Option<&Path>) -> Res<Self> {
        Self::load_with_env(explicit_path, None)
    }

    /// Load using `env` in place of the process environment when given.
    pub fn load_with_env(explicit_path: Option<&Path>, env: Option<config::Map<String, String>>) -> Res<Self> {
        let mut cfg = config::Config::builder();

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        }

        cfg = cfg
            .add_source(config::Environment::default().ignore_empty(true).source(env.clone()))
            .add_source(config::Environment::with_prefix(INPUT_PREFIX).ignore_empty(true).source(env));

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    fn validate(&self) -> Res<()> {
        if self.bot_token.is_empty() {
            return Err(anyhow::anyhow!("Please set the BOT_TOKEN secret."));
        }

        if self.post_message.is_empty() && self.message_file.is_empty() {
            return Err(anyhow::anyhow!("Please set the post message or a file containing the message."));
        }

        if self.request_timeout_secs < 1 || self.request_timeout_secs > 300 {
            return Err(anyhow::anyhow!("Request timeout must be between 1 and 300 seconds."));
        }

        Ok(())
    }

    /// Whether both halves of the mention data are present.
    pub fn has_mention_data(&self) -> bool {
        !self.user_maps.is_empty() && !self.assignees.is_empty()
    }

    /// Full webhook URL for the configured bot.
    pub fn webhook_url(&self) -> String {
        format!("{}/{}", self.webhook_base_url.trim_end_matches('/'), self.bot_token)
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }

    #[test]
    fn test_bare_env_and_defaults() {
        let config = Config::load_with_env(None, env(&[("BOT_TOKEN", "T"), ("POST_MESSAGE", "Build failed")])).unwrap();

        assert_eq!(config.bot_token, "T");
        assert_eq!(config.post_message, "Build failed");
        assert_eq!(config.msg_type, MsgType::Text);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.webhook_url(), "https://open.feishu.cn/open-apis/bot/v2/hook/T");
        assert!(!config.has_mention_data());
    }

    #[test]
    fn test_input_vars_take_precedence() {
        let config = Config::load_with_env(None, env(&[("BOT_TOKEN", "bare"), ("INPUT_BOT_TOKEN", "wrapped"), ("INPUT_POST_MESSAGE", "hi")])).unwrap();

        assert_eq!(config.bot_token, "wrapped");
        assert_eq!(config.post_message, "hi");
    }

    #[test]
    fn test_empty_input_var_falls_back() {
        let config = Config::load_with_env(None, env(&[("BOT_TOKEN", "bare"), ("INPUT_BOT_TOKEN", ""), ("POST_MESSAGE", "hi")])).unwrap();

        assert_eq!(config.bot_token, "bare");
    }

    #[test]
    fn test_missing_bot_token() {
        let err = Config::load_with_env(None, env(&[("POST_MESSAGE", "hi"), ("INPUT_BOT_TOKEN", "")])).unwrap_err();

        assert_eq!(err.to_string(), "Please set the BOT_TOKEN secret.");
    }

    #[test]
    fn test_missing_message_source() {
        let err = Config::load_with_env(None, env(&[("BOT_TOKEN", "T")])).unwrap_err();

        assert_eq!(err.to_string(), "Please set the post message or a file containing the message.");
    }

    #[test]
    fn test_message_file_is_enough() {
        let config = Config::load_with_env(None, env(&[("BOT_TOKEN", "T"), ("MESSAGE_FILE", "msg.txt")])).unwrap();

        assert_eq!(config.message_file, "msg.txt");
        assert!(config.post_message.is_empty());
    }

    #[test]
    fn test_msg_type() {
        let config = Config::load_with_env(None, env(&[("BOT_TOKEN", "T"), ("POST_MESSAGE", "hi"), ("INPUT_MSG_TYPE", "markdown")])).unwrap();
        assert_eq!(config.msg_type, MsgType::Markdown);

        let err = Config::load_with_env(None, env(&[("BOT_TOKEN", "T"), ("POST_MESSAGE", "hi"), ("MSG_TYPE", "html")])).unwrap_err();
        assert!(err.to_string().contains("Unsupported MSG_TYPE: html"), "{err}");
    }

    #[test]
    fn test_mention_data() {
        let config = Config::load_with_env(
            None,
            env(&[("BOT_TOKEN", "T"), ("POST_MESSAGE", "hi"), ("USER_MAPS", "a:1"), ("INPUT_ASSIGNEES", r#"[{"login":"a"}]"#)]),
        )
        .unwrap();

        assert!(config.has_mention_data());
        assert_eq!(config.assignees, r#"[{"login":"a"}]"#);
    }

    #[test]
    fn test_timeout_bounds() {
        let err = Config::load_with_env(None, env(&[("BOT_TOKEN", "T"), ("POST_MESSAGE", "hi"), ("REQUEST_TIMEOUT_SECS", "0")])).unwrap_err();

        assert_eq!(err.to_string(), "Request timeout must be between 1 and 300 seconds.");
    }

    #[test]
    fn test_file_layer_is_lowest() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "bot_token = \"from-file\"\npost_message = \"file message\"\nwebhook_base_url = \"http://localhost:9/hook/\"").unwrap();

        let config = Config::load_with_env(Some(file.path()), env(&[("INPUT_BOT_TOKEN", "from-env")])).unwrap();

        assert_eq!(config.bot_token, "from-env");
        assert_eq!(config.post_message, "file message");
        assert_eq!(config.webhook_url(), "http://localhost:9/hook/from-env");
    }
}
