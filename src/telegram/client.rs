use crate::error::{RelayError, Result};
use crate::models::ChatId;
use crate::telegram::models::{ApiResponse, Update, User};
use crate::transport::Transport;
use futures::future::{BoxFuture, FutureExt};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

/// Longest text `sendMessage` accepts.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Extra time on top of the long-poll timeout before the HTTP request gives up.
const POLL_GRACE_SECS: u64 = 10;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Minimal Bot API client over HTTPS.
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str, api_base: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(RelayError::ConfigError("Telegram token is empty".to_string()));
        }

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            base_url: format!("{}/bot{}", api_base.trim_end_matches('/'), token),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &Value,
        timeout: Duration,
    ) -> Result<T> {
        let response = self
            .http
            .post(self.method_url(method))
            .timeout(timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        let parsed: ApiResponse<T> = match serde_json::from_str(&response_text) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(RelayError::ApiError {
                    status: status.as_u16(),
                    message: response_text,
                });
            }
            Err(e) => return Err(e.into()),
        };

        if !parsed.ok {
            return Err(RelayError::ApiError {
                status: parsed.error_code.unwrap_or(status.as_u16()),
                message: parsed
                    .description
                    .unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        parsed.result.ok_or_else(|| {
            RelayError::MalformedResponse(format!("{} returned no result", method))
        })
    }

    /// Identify the bot; fails when the token is rejected.
    pub async fn get_me(&self) -> Result<User> {
        self.call("getMe", &json!({}), Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .await
    }

    /// Long-poll for message updates starting at `offset`.
    pub async fn get_updates(&self, offset: i64, poll_timeout: u64) -> Result<Vec<Update>> {
        let body = json!({
            "offset": offset,
            "timeout": poll_timeout,
            "allowed_updates": ["message"],
        });
        self.call(
            "getUpdates",
            &body,
            Duration::from_secs(poll_timeout + POLL_GRACE_SECS),
        )
        .await
    }

    pub async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        parse_mode: Option<&str>,
    ) -> Result<()> {
        for chunk in split_message(text, MAX_MESSAGE_CHARS) {
            let mut body = json!({
                "chat_id": chat_id,
                "text": chunk,
            });
            if let Some(mode) = parse_mode {
                body["parse_mode"] = json!(mode);
            }

            let _: Value = self
                .call("sendMessage", &body, Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .await?;
        }

        debug!(chat_id, chars = text.chars().count(), "message sent");
        Ok(())
    }

    pub async fn send_chat_action(&self, chat_id: ChatId, action: &str) -> Result<()> {
        let body = json!({
            "chat_id": chat_id,
            "action": action,
        });
        let _: bool = self
            .call("sendChatAction", &body, Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .await?;
        Ok(())
    }
}

impl Transport for TelegramClient {
    fn send_text<'a>(&'a self, chat_id: ChatId, text: &'a str) -> BoxFuture<'a, Result<()>> {
        self.send_message(chat_id, text, None).boxed()
    }

    fn send_markdown<'a>(&'a self, chat_id: ChatId, text: &'a str) -> BoxFuture<'a, Result<()>> {
        self.send_message(chat_id, text, Some("Markdown")).boxed()
    }

    fn send_typing(&self, chat_id: ChatId) -> BoxFuture<'_, Result<()>> {
        self.send_chat_action(chat_id, "typing").boxed()
    }
}

/// Split `text` into pieces of at most `limit` characters, preferring line breaks.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    loop {
        if rest.chars().count() <= limit {
            chunks.push(rest.to_string());
            break;
        }

        let hard_cut = rest
            .char_indices()
            .nth(limit)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let cut = rest[..hard_cut]
            .rfind('\n')
            .filter(|&i| i > 0)
            .map(|i| i + 1)
            .unwrap_or(hard_cut);

        chunks.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }

    chunks
}
