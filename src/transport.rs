use crate::error::Result;
use crate::models::ChatId;
use futures::future::BoxFuture;

/// Outbound side of the chat platform.
pub trait Transport: Send + Sync {
    fn send_text<'a>(&'a self, chat_id: ChatId, text: &'a str) -> BoxFuture<'a, Result<()>>;

    /// Send text the platform should render as Markdown.
    fn send_markdown<'a>(&'a self, chat_id: ChatId, text: &'a str) -> BoxFuture<'a, Result<()>>;

    fn send_typing(&self, chat_id: ChatId) -> BoxFuture<'_, Result<()>>;
}
