use super::defaults::{
    default_fallback_reply, default_language, default_poll_timeout, default_typing_delay_ms,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout: u64,
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_api: Option<String>,
    #[serde(default)]
    pub verbose: Option<bool>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            typing_delay_ms: default_typing_delay_ms(),
            poll_timeout: default_poll_timeout(),
            fallback_reply: default_fallback_reply(),
            telegram_api: None,
            verbose: None,
        }
    }
}
