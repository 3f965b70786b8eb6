use crate::error::Result;
use futures::future::BoxFuture;

/// A hosted model that turns a prompt into reply text.
pub trait CompletionService: Send + Sync {
    /// Any failure (transport, status, response shape, timeout) comes back as `Err`.
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String>>;
}
