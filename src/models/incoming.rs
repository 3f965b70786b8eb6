use crate::history::UserId;

/// Platform chat identity; replies go here.
pub type ChatId = i64;

/// A plain text message the relay should answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub user_id: UserId,
    pub chat_id: ChatId,
    pub text: String,
}
